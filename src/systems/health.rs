use bevy::prelude::*;

use crate::systems::flight::FlightModel;

/// Damage dealt to a plane by a weapon or collision collaborator.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f64,
}

impl DamageEvent {
    pub fn new(target: Entity, amount: f64) -> Self {
        Self { target, amount }
    }
}

/// Applies pending [`DamageEvent`]s to the flight models they target.
pub fn apply_damage_system(
    mut events: EventReader<DamageEvent>,
    mut planes: Query<&mut FlightModel>,
) {
    for event in events.read() {
        match planes.get_mut(event.target) {
            Ok(mut model) => {
                let health = model.apply_damage(event.amount);
                debug!(
                    "{:?} took {:.1} damage, {:.1} left",
                    event.target, event.amount, health
                );
            }
            Err(_) => warn!("Damage for {:?} without a flight model", event.target),
        }
    }
}
