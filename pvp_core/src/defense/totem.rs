//! Totem of undying - last stand against a lethal hit

use crate::config::TotemConstants;
use crate::damage::DamageCause;
use crate::hooks::{HookRegistry, TotemUseEvent};
use crate::types::{ActiveStatusEffect, ActorId, Hand, ItemStack, StatusEffectKind};
use crate::world::{CombatState, EntityStatus, Equipment, Notifier};

/// Try to save a victim from a lethal hit with a held totem.
///
/// Hands are checked main hand first. A vetoed totem is skipped and the
/// other hand is tried; the first accepted totem is consumed and the search
/// stops. Returns whether a totem activated.
pub fn try_last_stand<W>(
    world: &mut W,
    hooks: &HookRegistry,
    constants: &TotemConstants,
    victim: ActorId,
    cause: &DamageCause,
) -> bool
where
    W: CombatState + Equipment + Notifier + ?Sized,
{
    if cause.is_out_of_world() {
        return false;
    }

    let mut used = None;
    for hand in Hand::all() {
        let stack = world.item(victim, hand.slot());
        if !stack.is(ItemStack::TOTEM_OF_UNDYING) {
            continue;
        }

        let mut event = TotemUseEvent::new(victim, *hand);
        hooks.dispatch_totem_use(&mut event);
        if event.is_cancelled() {
            tracing::debug!(%victim, ?hand, "totem use vetoed");
            continue;
        }

        world.set_item(victim, hand.slot(), stack.with_amount(stack.amount.saturating_sub(1)));
        used = Some(*hand);
        break;
    }

    let Some(hand) = used else {
        return false;
    };

    world.set_health(victim, constants.revival_health);
    world.clear_effects(victim);
    world.add_effect(
        victim,
        ActiveStatusEffect::new(
            StatusEffectKind::Regeneration,
            constants.regeneration_amplifier,
            constants.regeneration_ticks,
        ),
    );
    world.add_effect(
        victim,
        ActiveStatusEffect::new(
            StatusEffectKind::Absorption,
            constants.absorption_amplifier,
            constants.absorption_ticks,
        ),
    );
    world.add_effect(
        victim,
        ActiveStatusEffect::new(
            StatusEffectKind::FireResistance,
            constants.fire_resistance_amplifier,
            constants.fire_resistance_ticks,
        ),
    );
    world.trigger_status(victim, EntityStatus::TotemOfUndying);

    tracing::debug!(%victim, ?hand, cause = %cause, "totem of undying activated");
    true
}
