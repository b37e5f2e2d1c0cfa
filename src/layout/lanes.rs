use super::transform::pixel_x;
use super::types::PlacedCard;
use crate::config::{CollisionPolicy, EraConfig, LayoutConfig};
use crate::ir::Event;
use crate::viewport::Viewport;

/// Greedy lane assignment: events sweep in `(year, id)` order and each takes
/// the lowest lane whose occupied x positions stay at least the collision
/// threshold away. The inner search terminates because the candidate lane
/// index strictly increases.
pub fn assign_lanes(
    events: &[&Event],
    era: &EraConfig,
    viewport: Viewport,
    config: &LayoutConfig,
) -> Vec<PlacedCard> {
    let mut order: Vec<&Event> = events.to_vec();
    order.sort_by_key(|event| (event.year, event.id));

    let threshold = config.cards.width * config.cards.collision_fraction;
    let mut occupied: Vec<(usize, i32, f32)> = Vec::with_capacity(order.len());
    let mut cards = Vec::with_capacity(order.len());

    for event in order {
        let x = pixel_x(event.year, era, viewport, config.margin_left);
        let mut lane = 0usize;
        while collides(&occupied, lane, event.year, x, threshold, config.collision_policy) {
            lane += 1;
        }
        occupied.push((lane, event.year, x));
        cards.push(PlacedCard {
            event_id: event.id,
            x,
            y: config.cards.base_offset + lane as f32 * config.cards.vertical_spacing,
            lane,
        });
    }

    cards
}

fn collides(
    occupied: &[(usize, i32, f32)],
    lane: usize,
    year: i32,
    x: f32,
    threshold: f32,
    policy: CollisionPolicy,
) -> bool {
    occupied.iter().any(|&(used_lane, used_year, used_x)| {
        if used_lane != lane {
            return false;
        }
        if policy == CollisionPolicy::PerYear && used_year != year {
            return false;
        }
        (used_x - x).abs() < threshold
    })
}
