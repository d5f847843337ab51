//! Room assignment (best-fit template matching)
//!
//! Templates are matched to empty leaf containers one room type at a time,
//! scarce single-instance types first so that the unbounded filler type
//! cannot crowd them out. For every chosen container the largest fitting
//! template not yet used in this run wins; a reused template is only taken
//! when no unused one fits.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;

use crate::error::GenerateError;
use crate::rng::DungeonRng;

use super::rect::Rectangle;
use super::room::{Room, RoomTemplate, RoomType};
use super::tree::{Container, PartitionTree};

/// How many rooms of a type to place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomQuota {
    Exactly(usize),
    /// Every empty leaf left at this point
    Fill,
}

/// Room types in placement order, with their quotas
pub const ROOM_QUOTAS: [(RoomType, RoomQuota); 5] = [
    (RoomType::Boss, RoomQuota::Exactly(1)),
    (RoomType::Entrance, RoomQuota::Exactly(1)),
    (RoomType::Heal, RoomQuota::Exactly(1)),
    (RoomType::Treasure, RoomQuota::Exactly(1)),
    (RoomType::Monsters, RoomQuota::Fill),
];

/// Outcome of placing one room type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaOutcome {
    pub room_type: RoomType,
    pub requested: usize,
    pub placed: usize,
}

/// Per-type summary of an assignment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    pub outcomes: Vec<QuotaOutcome>,
}

impl AssignmentReport {
    /// Rooms placed for `room_type`
    pub fn placed(&self, room_type: RoomType) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.room_type == room_type)
            .map(|o| o.placed)
            .sum()
    }

    pub fn total_placed(&self) -> usize {
        self.outcomes.iter().map(|o| o.placed).sum()
    }

    /// True when some type got fewer rooms than requested
    pub fn is_short(&self) -> bool {
        self.outcomes.iter().any(|o| o.placed < o.requested)
    }
}

/// Fill the leaves of `tree` with rooms following [`ROOM_QUOTAS`]
pub fn assign_rooms(
    tree: &mut PartitionTree,
    templates: &[Arc<RoomTemplate>],
    rng: &mut DungeonRng,
) -> Result<AssignmentReport, GenerateError> {
    let mut used_templates = HashSet::new();
    let mut report = AssignmentReport::default();

    for (room_type, quota) in ROOM_QUOTAS {
        let outcome = fill_by_type(tree, templates, room_type, quota, &mut used_templates, rng)?;
        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Place up to `quota` rooms of `room_type` into empty leaves.
///
/// Each attempt consumes one randomly chosen empty container. A container no
/// template fits is left empty and does not count toward the quota.
pub fn fill_by_type<'a>(
    tree: &mut PartitionTree,
    templates: &'a [Arc<RoomTemplate>],
    room_type: RoomType,
    quota: RoomQuota,
    used_templates: &mut HashSet<&'a str>,
    rng: &mut DungeonRng,
) -> Result<QuotaOutcome, GenerateError> {
    let candidates = templates_by_type(templates, room_type);
    if candidates.is_empty() {
        return Err(GenerateError::NoTemplatesForType(room_type));
    }

    let mut containers: Vec<&mut Container> = tree
        .leaves_mut()
        .into_iter()
        .filter(|leaf| leaf.room.is_none())
        .collect();

    let requested = match quota {
        RoomQuota::Exactly(count) => count,
        RoomQuota::Fill => containers.len(),
    };
    if containers.is_empty() && requested > 0 {
        return Err(GenerateError::NoContainersAvailable {
            room_type,
            count: requested,
        });
    }

    let mut placed = 0;
    while placed < requested && !containers.is_empty() {
        let index = rng.rn2(containers.len() as u32) as usize;
        let container = containers.swap_remove(index);

        match find_fitting_template(&candidates, &container.rect, used_templates) {
            Some(template) => {
                let center = container.rect.center();
                let x = (center.x - f64::from(template.width) / 2.0).floor() as i32;
                let y = (center.y - f64::from(template.height) / 2.0).floor() as i32;
                container.room = Some(Room::new(x, y, Arc::clone(template)));
                used_templates.insert(template.id.as_str());
                placed += 1;
            }
            None => {
                warn!(
                    "Couldn't find a template fitting width={} height={} for type={}",
                    container.rect.width, container.rect.height, room_type
                );
            }
        }
    }

    Ok(QuotaOutcome {
        room_type,
        requested,
        placed,
    })
}

/// Templates of `room_type`, largest first by `(width, height)`.
/// Equal sizes come out in reverse catalog order.
fn templates_by_type(templates: &[Arc<RoomTemplate>], room_type: RoomType) -> Vec<&Arc<RoomTemplate>> {
    let mut result: Vec<_> = templates
        .iter()
        .filter(|t| t.room_type == room_type)
        .collect();
    result.sort_by_key(|t| (t.width, t.height));
    result.reverse();
    result
}

/// Largest unused template that fits `rect`, else the largest that fits
pub fn find_fitting_template<'a>(
    sorted: &[&'a Arc<RoomTemplate>],
    rect: &Rectangle,
    used: &HashSet<&str>,
) -> Option<&'a Arc<RoomTemplate>> {
    sorted
        .iter()
        .find(|t| !used.contains(t.id.as_str()) && t.fits_in(rect))
        .or_else(|| sorted.iter().find(|t| t.fits_in(rect)))
        .copied()
}
