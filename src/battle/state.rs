use crate::battle::conditions::PokemonConditionType;
use crate::battle::field::Field;
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{
    Ability, FieldCondition, Hazard, Invulnerability, Item, Move, PokemonType, StatType,
    TeamCondition, Terrain, Weather,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Move Flow
    MoveUsed {
        player_index: usize,
        pokemon: String,
        move_used: Move,
    },
    /// A calling move picked this one.
    MoveCalled {
        pokemon: String,
        move_used: Move,
    },
    MoveMissed {
        attacker: String,
        defender: String,
        move_used: Move,
    },
    MoveFailed {
        pokemon: String,
        move_used: Move,
    },
    MoveReflected {
        pokemon: String,
        move_used: Move,
    },
    Protected {
        pokemon: String,
        move_used: Move,
    },
    NoEffect {
        target: String,
    },
    ChargingStarted {
        pokemon: String,
        move_used: Move,
    },
    SemiInvulnerableEntered {
        pokemon: String,
        state: Invulnerability,
    },

    // Damage and Healing
    CriticalHit {
        attacker: String,
        defender: String,
        move_used: Move,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    SubstituteDamaged {
        target: String,
        damage: u16,
    },
    SubstituteBroke {
        target: String,
    },
    HitCount {
        hits: u8,
    },
    PokemonHealed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    RecoilDamage {
        target: String,
        damage: u16,
    },
    CrashDamage {
        target: String,
        damage: u16,
    },
    EnduredHit {
        pokemon: String,
    },
    PokemonFainted {
        player_index: usize,
        pokemon: String,
    },

    // Stat Changes
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
        reason: String,
    },
    StatStagesReset {
        target: String,
    },

    // Pokemon Status Conditions (Sleep, Poison, Burn, etc.)
    PokemonStatusApplied {
        target: String,
        status: StatusCondition,
    },
    PokemonStatusRemoved {
        target: String,
        status: StatusCondition,
    },

    // Volatile Conditions
    StatusApplied {
        target: String,
        status: PokemonConditionType,
    },
    StatusRemoved {
        target: String,
        status: PokemonConditionType,
    },

    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },

    // Field
    WeatherStarted {
        weather: Weather,
    },
    WeatherEnded,
    TerrainStarted {
        terrain: Terrain,
    },
    FieldConditionStarted {
        condition: FieldCondition,
    },
    FieldConditionEnded {
        condition: FieldCondition,
    },
    TeamConditionApplied {
        player_index: usize,
        condition: TeamCondition,
    },
    TeamConditionRemoved {
        player_index: usize,
        condition: TeamCondition,
    },
    HazardSet {
        player_index: usize,
        hazard: Hazard,
    },
    HazardsCleared {
        player_index: usize,
    },

    // Switching
    PokemonSwitched {
        player_index: usize,
        old_pokemon: String,
        new_pokemon: String,
    },
    SwitchRequested {
        player_index: usize,
    },

    // Items, Abilities, Types, Move Slots
    ItemRemoved {
        pokemon: String,
        item: Item,
    },
    ItemObtained {
        pokemon: String,
        item: Item,
    },
    ItemConsumed {
        pokemon: String,
        item: Item,
    },
    AbilityChanged {
        pokemon: String,
        ability: Option<Ability>,
    },
    TypeChanged {
        pokemon: String,
        types: Vec<PokemonType>,
    },
    MoveReplaced {
        pokemon: String,
        old_move: Move,
        new_move: Move,
    },
    PPRestored {
        pokemon: String,
        move_used: Move,
        amount: u8,
    },
    PPReduced {
        pokemon: String,
        move_used: Move,
        amount: u8,
    },
    Transformed {
        pokemon: String,
        target: String,
    },
    NothingHappened,
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            // === Move Events ===
            BattleEvent::MoveUsed {
                player_index,
                pokemon,
                move_used,
            } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{}'s {} used {}!", player_name, pokemon, move_used))
            }
            BattleEvent::MoveCalled { pokemon, move_used } => {
                Some(format!("{} called {}!", pokemon, move_used))
            }
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::MoveFailed { .. } => Some("But it failed!".to_string()),
            BattleEvent::MoveReflected { pokemon, move_used } => {
                Some(format!("{} bounced the {} back!", pokemon, move_used))
            }
            BattleEvent::Protected { pokemon, .. } => {
                Some(format!("{} protected itself!", pokemon))
            }
            BattleEvent::NoEffect { target } => {
                Some(format!("It doesn't affect {}...", target))
            }
            BattleEvent::ChargingStarted { pokemon, move_used } => {
                Some(format!("{} is charging up {}!", pokemon, move_used))
            }
            BattleEvent::SemiInvulnerableEntered { pokemon, state } => {
                let text = match state {
                    Invulnerability::Airborne => "flew up high!",
                    Invulnerability::Underground => "burrowed its way under the ground!",
                    Invulnerability::Underwater => "hid underwater!",
                    Invulnerability::Vanished => "vanished instantly!",
                };
                Some(format!("{} {}", pokemon, text))
            }

            // === Damage and Healing Events ===
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::SubstituteDamaged { target, .. } => {
                Some(format!("The substitute took damage for {}!", target))
            }
            BattleEvent::SubstituteBroke { target } => {
                Some(format!("{}'s substitute faded!", target))
            }
            BattleEvent::HitCount { hits } => {
                if *hits == 1 {
                    Some("Hit 1 time!".to_string())
                } else {
                    Some(format!("Hit {} times!", hits))
                }
            }
            BattleEvent::PokemonHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::RecoilDamage { target, .. } => {
                Some(format!("{} was damaged by the recoil!", target))
            }
            BattleEvent::CrashDamage { target, .. } => {
                Some(format!("{} kept going and crashed!", target))
            }
            BattleEvent::EnduredHit { pokemon } => Some(format!("{} endured the hit!", pokemon)),
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),

            // === Stat Change Events ===
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let change = new_stage - old_stage;
                let text = match change {
                    0 if *old_stage >= 6 => "won't go any higher!",
                    0 => "won't go any lower!",
                    1 => "rose!",
                    2 => "rose sharply!",
                    c if c >= 3 => "rose drastically!",
                    -1 => "fell!",
                    -2 => "harshly fell!",
                    _ => "severely fell!",
                };
                Some(format!("{}'s {} {}", target, stat, text))
            }
            BattleEvent::StatChangeBlocked { target, reason, .. } => {
                Some(format!("{}'s stats were not lowered! ({})", target, reason))
            }
            BattleEvent::StatStagesReset { target } => {
                Some(format!("{}'s stat changes were removed!", target))
            }

            // === Status Events ===
            BattleEvent::PokemonStatusApplied { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_pokemon_status_applied(status)
            )),
            BattleEvent::PokemonStatusRemoved { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_pokemon_status_removed(status)
            )),
            BattleEvent::StatusApplied { target, status } => {
                Some(Self::format_condition_applied(target, *status))
            }
            BattleEvent::StatusRemoved { target, status } => Some(format!(
                "{} is no longer affected by {}.",
                target,
                Self::format_condition(*status)
            )),
            BattleEvent::ActionFailed { pokemon, reason } => Some(format!(
                "{} {}",
                pokemon,
                Self::format_action_failure_reason(reason)
            )),

            // === Field Events ===
            BattleEvent::WeatherStarted { weather } => {
                Some(format!("The weather changed to {}!", weather))
            }
            BattleEvent::WeatherEnded => Some("The weather returned to normal.".to_string()),
            BattleEvent::TerrainStarted { terrain } => {
                Some(format!("{} covered the battlefield!", terrain))
            }
            BattleEvent::FieldConditionStarted { condition } => {
                Some(format!("{} took hold of the battlefield!", condition))
            }
            BattleEvent::FieldConditionEnded { condition } => {
                Some(format!("{} wore off.", condition))
            }
            BattleEvent::TeamConditionApplied {
                player_index,
                condition,
            } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{}'s team is protected by {}!", player_name, condition))
            }
            BattleEvent::TeamConditionRemoved {
                player_index,
                condition,
            } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{}'s {} wore off!", player_name, condition))
            }
            BattleEvent::HazardSet {
                player_index,
                hazard,
            } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("{} lies on {}'s side of the field!", hazard, player_name))
            }
            BattleEvent::HazardsCleared { player_index } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!("The hazards around {}'s team disappeared!", player_name))
            }

            // === Switching Events ===
            BattleEvent::PokemonSwitched {
                player_index,
                old_pokemon,
                new_pokemon,
            } => {
                let player_name = &battle_state.players[*player_index].player_name;
                Some(format!(
                    "{} recalled {} and sent out {}!",
                    player_name, old_pokemon, new_pokemon
                ))
            }
            BattleEvent::SwitchRequested { .. } => None,

            // === Item / Ability / Type Events ===
            BattleEvent::ItemRemoved { pokemon, item } => {
                Some(format!("{} lost its {}!", pokemon, item))
            }
            BattleEvent::ItemObtained { pokemon, item } => {
                Some(format!("{} obtained {}!", pokemon, item))
            }
            BattleEvent::ItemConsumed { pokemon, item } => {
                Some(format!("{} used its {}!", pokemon, item))
            }
            BattleEvent::AbilityChanged { pokemon, ability } => match ability {
                Some(ability) => Some(format!("{} acquired {}!", pokemon, ability)),
                None => Some(format!("{}'s ability was suppressed!", pokemon)),
            },
            BattleEvent::TypeChanged { pokemon, types } => {
                let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
                Some(format!("{} became the {} type!", pokemon, names.join("/")))
            }
            BattleEvent::MoveReplaced {
                pokemon, new_move, ..
            } => Some(format!("{} learned {}!", pokemon, new_move)),
            BattleEvent::PPRestored {
                pokemon, move_used, ..
            } => Some(format!("{} restored PP to {}!", pokemon, move_used)),
            BattleEvent::PPReduced {
                pokemon,
                move_used,
                amount,
            } => Some(format!(
                "It reduced the PP of {}'s {} by {}!",
                pokemon, move_used, amount
            )),
            BattleEvent::Transformed { pokemon, target } => {
                Some(format!("{} transformed into {}!", pokemon, target))
            }
            BattleEvent::NothingHappened => Some("But nothing happened!".to_string()),
        }
    }

    // --- Private Helper Functions ---

    fn format_condition(condition: PokemonConditionType) -> String {
        match condition {
            PokemonConditionType::Confused => "confusion".to_string(),
            PokemonConditionType::Infatuated => "love".to_string(),
            PokemonConditionType::Trapped => "a binding move".to_string(),
            PokemonConditionType::CantEscape => "a trap".to_string(),
            PokemonConditionType::Seeded => "Leech Seed".to_string(),
            PokemonConditionType::Taunted => "Taunt".to_string(),
            PokemonConditionType::Tormented => "Torment".to_string(),
            PokemonConditionType::Encored => "Encore".to_string(),
            PokemonConditionType::Disabled => "Disable".to_string(),
            PokemonConditionType::PerishSong => "Perish Song".to_string(),
            PokemonConditionType::HealBlock => "Heal Block".to_string(),
            PokemonConditionType::SemiInvulnerable => "a semi-invulnerable turn".to_string(),
            PokemonConditionType::Exhausted => "exhaustion".to_string(),
            other => {
                // CamelCase kind names read fine once spaced out
                let debug_string = format!("{:?}", other);
                debug_string
                    .chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if i > 0 && c.is_uppercase() {
                            format!(" {}", c)
                        } else {
                            c.to_string()
                        }
                    })
                    .collect()
            }
        }
    }

    fn format_condition_applied(target: &str, condition: PokemonConditionType) -> String {
        match condition {
            PokemonConditionType::Protected => format!("{} is protecting itself!", target),
            PokemonConditionType::Enduring => format!("{} braced itself!", target),
            PokemonConditionType::Substitute => format!("{} put in a substitute!", target),
            PokemonConditionType::Confused => format!("{} became confused!", target),
            PokemonConditionType::Infatuated => format!("{} fell in love!", target),
            PokemonConditionType::FocusEnergy => format!("{} is getting pumped!", target),
            PokemonConditionType::Drowsy => format!("{} grew drowsy!", target),
            other => format!("{} is affected by {}!", target, Self::format_condition(other)),
        }
    }

    fn format_pokemon_status_applied(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Sleep(_) => "fell asleep!".to_string(),
            StatusCondition::Poison => "was poisoned!".to_string(),
            StatusCondition::BadlyPoisoned(_) => "was badly poisoned!".to_string(),
            StatusCondition::Burn => "was burned!".to_string(),
            StatusCondition::Freeze => "was frozen solid!".to_string(),
            StatusCondition::Paralysis => "is paralyzed! It may be unable to move!".to_string(),
        }
    }

    fn format_pokemon_status_removed(status: &StatusCondition) -> String {
        match status {
            StatusCondition::Sleep(_) => "woke up!".to_string(),
            StatusCondition::Freeze => "thawed out!".to_string(),
            _ => format!("was cured of its {}!", status.status_type()),
        }
    }

    fn format_action_failure_reason(reason: &ActionFailureReason) -> String {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep.".to_string(),
            ActionFailureReason::IsFrozen => "is frozen solid!".to_string(),
            ActionFailureReason::IsParalyzed => "is fully paralyzed!".to_string(),
            ActionFailureReason::IsFlinching => "flinched and couldn't move!".to_string(),
            ActionFailureReason::HurtItselfInConfusion => "hurt itself in its confusion!".to_string(),
            ActionFailureReason::IsInfatuated => "is immobilized by love!".to_string(),
            ActionFailureReason::MustRecharge => "must recharge!".to_string(),
            ActionFailureReason::Loafing => "is loafing around!".to_string(),
            ActionFailureReason::NoPPRemaining => "has no PP left for that move!".to_string(),
            ActionFailureReason::IsDisabled => "can't use a disabled move!".to_string(),
            ActionFailureReason::IsTaunted => "can't use that move after the taunt!".to_string(),
            ActionFailureReason::IsTormented => "can't use the same move twice in a row due to the torment!".to_string(),
            ActionFailureReason::IsEncored => "must repeat its encored move!".to_string(),
            ActionFailureReason::HealBlocked => "can't use that move because of Heal Block!".to_string(),
            ActionFailureReason::GravityPrevents => "can't use that move because of gravity!".to_string(),
            ActionFailureReason::ChoiceLocked => "is locked into another move!".to_string(),
            ActionFailureReason::MoveFailedToExecute | ActionFailureReason::NoTarget => {
                "but it failed!".to_string()
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    IsFlinching,
    HurtItselfInConfusion,
    IsInfatuated,
    MustRecharge,
    Loafing,
    NoPPRemaining,
    IsDisabled,
    IsTaunted,
    IsTormented,
    IsEncored,
    HealBlocked,
    GravityPrevents,
    ChoiceLocked,
    MoveFailedToExecute,
    NoTarget, // The defender is gone (fainted or empty slot)
}

/// Event bus for collecting and managing battle events.
///
/// ## Usage Examples
///
/// ```rust,ignore
/// event_bus.print_debug();                                    // Just print events
/// event_bus.print_debug_with_message("Turn 1 events:");      // With header message
/// event_bus.print_formatted(&battle_state);                  // Human-readable format
/// let text = event_bus.transcript(&battle_state);            // One line per visible event
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Append every event from another bus, in order.
    pub fn extend(&mut self, other: EventBus) {
        self.events.extend(other.events);
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text (when available) along with battle context.
    /// Falls back to debug format for silent events.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for event in &self.events {
            match event.format(battle_state) {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    pub fn print_formatted_with_message(&self, message: &str, battle_state: &BattleState) {
        println!("{}", message);
        self.print_formatted(battle_state);
    }

    /// The player-visible log: one line per non-silent event.
    pub fn transcript(&self, battle_state: &BattleState) -> String {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    pub players: [BattlePlayer; 2],
    pub field: Field,
}

impl BattleState {
    pub fn new(id: String, player1: BattlePlayer, player2: BattlePlayer) -> Self {
        Self {
            battle_id: id,
            players: [player1, player2],
            field: Field::new(),
        }
    }

    pub fn pokemon(&self, player_index: usize) -> Option<&PokemonInst> {
        self.players
            .get(player_index)
            .and_then(|player| player.active_pokemon())
    }

    pub fn pokemon_mut(&mut self, player_index: usize) -> Option<&mut PokemonInst> {
        self.players
            .get_mut(player_index)
            .and_then(|player| player.active_pokemon_mut())
    }

    /// Display name of a side's active combatant, for events.
    pub fn pokemon_name(&self, player_index: usize) -> String {
        self.pokemon(player_index)
            .map(|pokemon| pokemon.name.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod event_formatting_tests {
    use super::*;
    use crate::player::BattlePlayer;
    use crate::pokemon::PokemonInst;
    use pretty_assertions::assert_eq;

    fn create_test_battle_state() -> BattleState {
        let pikachu = PokemonInst::new(
            "Pikachu",
            25,
            vec![PokemonType::Electric],
            [55, 40, 30, 40, 35, 70],
            vec![Move::Thunderbolt],
        );
        let charmander = PokemonInst::new(
            "Charmander",
            25,
            vec![PokemonType::Fire],
            [60, 40, 35, 45, 40, 50],
            vec![Move::Ember],
        );

        let player1 = BattlePlayer::new("p1".to_string(), "Player 1".to_string(), vec![pikachu]);
        let player2 =
            BattlePlayer::new("p2".to_string(), "Player 2".to_string(), vec![charmander]);

        BattleState::new("test".to_string(), player1, player2)
    }

    #[test]
    fn test_silent_events_return_none() {
        let battle_state = create_test_battle_state();
        let silent_events = vec![
            BattleEvent::AttackTypeEffectiveness { multiplier: 1.0 },
            BattleEvent::SwitchRequested { player_index: 0 },
        ];

        for event in silent_events {
            assert!(
                event.format(&battle_state).is_none(),
                "Event {:?} should be silent but returned text",
                event
            );
        }
    }

    #[test]
    fn test_event_text_samples() {
        let battle_state = create_test_battle_state();

        let used = BattleEvent::MoveUsed {
            player_index: 0,
            pokemon: "Pikachu".to_string(),
            move_used: Move::QuickAttack,
        };
        assert_eq!(
            used.format(&battle_state),
            Some("Player 1's Pikachu used Quick Attack!".to_string())
        );

        let resisted = BattleEvent::AttackTypeEffectiveness { multiplier: 0.5 };
        assert_eq!(
            resisted.format(&battle_state),
            Some("It's not very effective...".to_string())
        );

        let capped = BattleEvent::StatStageChanged {
            target: "Pikachu".to_string(),
            stat: StatType::Atk,
            old_stage: 6,
            new_stage: 6,
        };
        assert_eq!(
            capped.format(&battle_state),
            Some("Pikachu's Attack won't go any higher!".to_string())
        );
    }

    #[test]
    fn test_status_condition_formatting() {
        assert_eq!(
            BattleEvent::format_pokemon_status_applied(&StatusCondition::Sleep(3)),
            "fell asleep!"
        );
        assert_eq!(
            BattleEvent::format_pokemon_status_removed(&StatusCondition::Burn),
            "was cured of its burn!"
        );
        assert_eq!(
            BattleEvent::format_condition(PokemonConditionType::FocusEnergy),
            "Focus Energy"
        );
        assert_eq!(
            BattleEvent::format_condition_applied("Pikachu", PokemonConditionType::Protected),
            "Pikachu is protecting itself!"
        );
    }

    #[test]
    fn test_transcript_skips_silent_events() {
        let battle_state = create_test_battle_state();
        let mut event_bus = EventBus::new();
        event_bus.push(BattleEvent::MoveFailed {
            pokemon: "Pikachu".to_string(),
            move_used: Move::Thunderbolt,
        });
        event_bus.push(BattleEvent::SwitchRequested { player_index: 0 });
        event_bus.push(BattleEvent::NothingHappened);

        assert_eq!(event_bus.len(), 3);
        assert_eq!(
            event_bus.transcript(&battle_state),
            "But it failed!\nBut nothing happened!"
        );

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("MoveFailed"));
    }
}
