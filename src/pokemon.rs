use crate::move_data::get_move_max_pp;
use schema::{Ability, Gender, Item, Move, PokemonType, StatType, StatusType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    /// Turns left asleep.
    Sleep(u8),
    Poison,
    /// Escalating poison counter.
    BadlyPoisoned(u8),
    Burn,
    Freeze,
    Paralysis,
}

impl StatusCondition {
    pub fn status_type(&self) -> StatusType {
        match self {
            StatusCondition::Sleep(_) => StatusType::Sleep,
            StatusCondition::Poison => StatusType::Poison,
            StatusCondition::BadlyPoisoned(_) => StatusType::BadPoison,
            StatusCondition::Burn => StatusType::Burn,
            StatusCondition::Freeze => StatusType::Freeze,
            StatusCondition::Paralysis => StatusType::Paralysis,
        }
    }

    pub fn is_poison(&self) -> bool {
        matches!(
            self,
            StatusCondition::Poison | StatusCondition::BadlyPoisoned(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
    pub max_pp: u8,
    /// Set while Mimic has borrowed this slot; the original comes back on switch-out.
    #[serde(default)]
    pub replaced: Option<Box<MoveInstance>>,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(move_: Move) -> Self {
        let max_pp = get_move_max_pp(move_);
        MoveInstance {
            move_,
            pp: max_pp,
            max_pp,
            replaced: None,
        }
    }

    /// A slot filled by a copying effect with a fixed PP allowance.
    pub fn with_pp(move_: Move, pp: u8) -> Self {
        MoveInstance {
            move_,
            pp,
            max_pp: pp,
            replaced: None,
        }
    }

    /// Spend PP. Never goes below zero; returns how much was actually spent.
    pub fn use_pp(&mut self, amount: u8) -> u8 {
        let spent = amount.min(self.pp);
        self.pp -= spent;
        spent
    }

    /// Restore PP up to the slot maximum; returns how much was actually restored.
    pub fn restore_pp(&mut self, amount: u8) -> u8 {
        let restored = amount.min(self.max_pp.saturating_sub(self.pp));
        self.pp += restored;
        restored
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,
    pub level: u8,
    /// Current typing; type-changing effects rewrite this.
    pub types: Vec<PokemonType>,
    /// Typing the combatant entered battle with.
    pub species_types: Vec<PokemonType>,
    pub gender: Gender,
    /// Weight in hectograms.
    pub weight_hg: u16,
    pub curr_stats: [u16; 6], // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    current_hp: u16,
    pub status: Option<StatusCondition>,
    pub ability: Option<Ability>,
    pub base_ability: Option<Ability>,
    pub item: Option<Item>,
    pub moves: [Option<MoveInstance>; 4],
}

impl PokemonInst {
    pub fn new(
        name: impl Into<String>,
        level: u8,
        types: Vec<PokemonType>,
        stats: [u16; 6],
        moves: Vec<Move>,
    ) -> Self {
        let mut move_array = [const { None }; 4];
        for (i, move_) in moves.into_iter().take(4).enumerate() {
            move_array[i] = Some(MoveInstance::new(move_));
        }

        PokemonInst {
            name: name.into(),
            level,
            species_types: types.clone(),
            types,
            gender: Gender::Genderless,
            weight_hg: 500,
            curr_stats: stats,
            current_hp: stats[0],
            status: None,
            ability: None,
            base_ability: None,
            item: None,
            moves: move_array,
        }
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self.base_ability = Some(ability);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_weight(mut self, weight_hg: u16) -> Self {
        self.weight_hg = weight_hg;
        self
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.curr_stats[0]
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.current_hp == self.max_hp()
    }

    /// Remove HP and return how much was actually lost.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restore HP up to the maximum and return how much was actually gained.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let gained = amount.min(self.max_hp() - self.current_hp);
        self.current_hp += gained;
        gained
    }

    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    pub fn set_hp_to_max(&mut self) {
        self.current_hp = self.max_hp();
    }

    /// Raw stat value. Accuracy and evasion have no raw value and read as 100.
    pub fn stat(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Atk => self.curr_stats[1],
            StatType::Def => self.curr_stats[2],
            StatType::SpAtk => self.curr_stats[3],
            StatType::SpDef => self.curr_stats[4],
            StatType::Spe => self.curr_stats[5],
            StatType::Acc | StatType::Eva => 100,
        }
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }

    pub fn move_slot(&self, index: usize) -> Option<&MoveInstance> {
        self.moves.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn move_slot_mut(&mut self, index: usize) -> Option<&mut MoveInstance> {
        self.moves.get_mut(index).and_then(|slot| slot.as_mut())
    }

    pub fn find_move_slot(&self, move_: Move) -> Option<usize> {
        self.moves
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|m| m.move_ == move_))
    }

    pub fn known_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().flatten().map(|m| m.move_)
    }

    /// Put every Mimic-borrowed slot back the way it was.
    pub fn restore_replaced_moves(&mut self) {
        for slot in self.moves.iter_mut().flatten() {
            if let Some(original) = slot.replaced.take() {
                *slot = *original;
            }
        }
    }

    /// Copy another combatant's battle profile (Transform). HP, level and item stay.
    pub fn transform_into(&mut self, other: &PokemonInst) {
        self.types = other.types.clone();
        self.weight_hg = other.weight_hg;
        self.ability = other.ability;
        self.curr_stats[1..].copy_from_slice(&other.curr_stats[1..]);
        let mut moves = [const { None }; 4];
        for (i, move_) in other.known_moves().enumerate() {
            moves[i] = Some(MoveInstance::with_pp(move_, 5));
        }
        self.moves = moves;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> PokemonInst {
        PokemonInst::new(
            "Testmon",
            50,
            vec![PokemonType::Normal],
            [150, 100, 80, 70, 60, 90],
            vec![Move::Tackle, Move::Growl],
        )
    }

    #[test]
    fn test_pp_never_goes_negative() {
        let mut slot = MoveInstance::with_pp(Move::Tackle, 1);
        assert_eq!(slot.use_pp(2), 1);
        assert_eq!(slot.pp, 0);
        assert_eq!(slot.use_pp(1), 0);
        assert_eq!(slot.pp, 0);
    }

    #[test]
    fn test_restore_pp_caps_at_max() {
        let mut slot = MoveInstance::new(Move::Tackle);
        slot.use_pp(3);
        assert_eq!(slot.restore_pp(10), 3);
        assert_eq!(slot.pp, slot.max_pp);
    }

    #[test]
    fn test_damage_and_heal_report_actual_amounts() {
        let mut pokemon = sample();
        assert_eq!(pokemon.take_damage(200), 150);
        assert!(pokemon.is_fainted());
        assert_eq!(pokemon.heal(50), 0, "fainted combatants can't be healed");

        let mut pokemon = sample();
        pokemon.set_hp(100);
        assert_eq!(pokemon.heal(80), 50);
        assert!(pokemon.is_full_hp());
    }

    #[test]
    fn test_transform_copies_profile_but_keeps_hp() {
        let mut user = sample();
        user.set_hp(42);
        let target = PokemonInst::new(
            "Other",
            30,
            vec![PokemonType::Water],
            [200, 55, 65, 75, 85, 95],
            vec![Move::Surf],
        )
        .with_ability(Ability::WaterAbsorb);

        user.transform_into(&target);

        assert_eq!(user.types, vec![PokemonType::Water]);
        assert_eq!(user.stat(StatType::Spe), 95);
        assert_eq!(user.max_hp(), 150);
        assert_eq!(user.current_hp(), 42);
        assert_eq!(user.ability, Some(Ability::WaterAbsorb));
        assert_eq!(user.move_slot(0).map(|m| (m.move_, m.pp)), Some((Move::Surf, 5)));
        assert!(user.move_slot(1).is_none());
    }
}
