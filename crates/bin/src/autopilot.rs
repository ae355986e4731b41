//! Greedy stand-in for a human player, used by the headless runner.

use protocol::{Direction, Intent, Position, SessionSnapshot};

/// Intents for the next tick, chosen from the latest snapshot.
///
/// Heads for special food, then food, along the non-reversing move that
/// survives and gets closest. With no surviving move, dashes if it can.
pub fn plan(snapshot: &SessionSnapshot) -> Vec<Intent> {
    let Some(head) = snapshot.head() else {
        return Vec::new();
    };
    let target = snapshot.special_food.or(snapshot.food);

    let best = Direction::ALL
        .into_iter()
        .filter(|&dir| dir != snapshot.direction.opposite())
        .filter(|&dir| survives(snapshot, head + dir.vector()))
        .min_by_key(|&dir| {
            let distance = target.map_or(0, |t| manhattan(head + dir.vector(), t));
            // Prefer going straight on ties.
            (distance, dir != snapshot.direction)
        });

    match best {
        Some(dir) if dir != snapshot.direction => vec![Intent::SetDirection(dir)],
        Some(_) => Vec::new(),
        None if !snapshot.dash_active && snapshot.dash_cooldown_progress >= 1.0 => {
            vec![Intent::RequestDash]
        }
        None => Vec::new(),
    }
}

fn survives(snapshot: &SessionSnapshot, cell: Position) -> bool {
    if snapshot.dash_active {
        return true;
    }
    let in_bounds = (0..snapshot.grid_width).contains(&cell.x) && (0..snapshot.grid_height).contains(&cell.y);
    in_bounds && !snapshot.obstacles.contains(&cell) && !snapshot.snake.contains(&cell)
}

fn manhattan(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
