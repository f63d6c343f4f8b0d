//! Game records decoded out of the ROM's fixed tables.
//!
//! Each submodule exposes a pure `decode` function for a single record, which
//! the tests exercise directly, and a `load` function that pulls a whole
//! table, plus its auxiliary price, permission, and name tables, out of a
//! [`Rom`].
//!
//! [`Rom`]: ../rom/struct.Rom.html

use std::fmt;

mod battle;
mod item;
mod monster;
mod spell;

pub use battle::*;
pub use item::*;
pub use monster::*;
pub use spell::*;

/// Defines a plain enum of named, indexed game constants.
macro_rules! game_enum {
  (
    $(#[$meta:meta])*
    pub enum $name:ident {
      $($(#[$vmeta:meta])* $variant:ident = $idx:literal => $text:literal,)*
    }
  ) => {
    $(#[$meta])*
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub enum $name {
      $($(#[$vmeta])* $variant = $idx,)*
    }

    impl $name {
      /// Every value, in index order.
      pub const ALL: &'static [$name] = &[$($name::$variant,)*];

      /// Returns the value with the given index, if there is one.
      pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
      }

      /// Returns this value's index.
      pub fn index(self) -> usize {
        self as usize
      }

      /// Returns a display name.
      pub fn name(self) -> &'static str {
        match self {
          $($name::$variant => $text,)*
        }
      }

      /// Returns this value as a single-bit mask.
      pub fn mask(self) -> u32 {
        1 << self as u32
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
      }
    }
  };
}

game_enum! {
  /// A character class.
  pub enum Job {
    /// Fighter.
    Fighter = 0 => "Fighter",
    /// Thief.
    Thief = 1 => "Thief",
    /// Black Belt.
    BlackBelt = 2 => "Black Belt",
    /// Red Mage.
    RedMage = 3 => "Red Mage",
    /// White Mage.
    WhiteMage = 4 => "White Mage",
    /// Black Mage.
    BlackMage = 5 => "Black Mage",
    /// Knight.
    Knight = 6 => "Knight",
    /// Ninja.
    Ninja = 7 => "Ninja",
    /// Master.
    Master = 8 => "Master",
    /// Red Wizard.
    RedWizard = 9 => "Red Wizard",
    /// White Wizard.
    WhiteWizard = 10 => "White Wizard",
    /// Black Wizard.
    BlackWizard = 11 => "Black Wizard",
  }
}

game_enum! {
  /// A status effect.
  pub enum Status {
    /// Death.
    Death = 0 => "Death",
    /// Stone.
    Stone = 1 => "Stone",
    /// Poison.
    Poison = 2 => "Poison",
    /// Darkness.
    Dark = 3 => "Dark",
    /// Stun.
    Stun = 4 => "Stun",
    /// Sleep.
    Sleep = 5 => "Sleep",
    /// Mute.
    Mute = 6 => "Mute",
    /// Confusion.
    Confusion = 7 => "Confusion",
  }
}

game_enum! {
  /// An element, for attacks, spells and resistances.
  pub enum Element {
    /// Status attacks.
    Status = 0 => "Status",
    /// Poison and stone.
    Poison = 1 => "Poison",
    /// Time and dimension.
    Dimension = 2 => "Dimension",
    /// Instant death.
    Death = 3 => "Death",
    /// Fire.
    Fire = 4 => "Fire",
    /// Ice.
    Ice = 5 => "Ice",
    /// Lightning.
    Lightning = 6 => "Lightning",
    /// Earth.
    Earth = 7 => "Earth",
  }
}

game_enum! {
  /// A monster category, which some weapons are strong against.
  pub enum Category {
    /// Humanoids.
    Humanoid = 0 => "Humanoid",
    /// Dragons.
    Dragon = 1 => "Dragon",
    /// Giants.
    Giant = 2 => "Giant",
    /// Undead.
    Undead = 3 => "Undead",
    /// Were-creatures.
    Were = 4 => "Were",
    /// Aquatic monsters.
    Water = 5 => "Water",
    /// Mages.
    Mage = 6 => "Mage",
    /// Regenerating monsters.
    Regen = 7 => "Regen",
  }
}

game_enum! {
  /// Where a piece of equipment is worn. Exports write `mask()`.
  pub enum WearLocation {
    /// The weapon hand.
    Hand = 0 => "Hand",
    /// The shield hand.
    OffHand = 1 => "Off-hand",
    /// Helmets.
    Head = 2 => "Head",
    /// Body armor.
    Body = 3 => "Body",
    /// Gauntlets, bracelets and rings.
    Glove = 4 => "Glove",
    /// Relics.
    Relic = 5 => "Relic",
  }
}

game_enum! {
  /// Whom a spell affects.
  pub enum SpellTarget {
    /// All enemies.
    AllEnemies = 0 => "All enemies",
    /// A single enemy.
    OneEnemy = 1 => "One enemy",
    /// The caster.
    Caster = 2 => "Self",
    /// The whole party.
    AllAllies = 3 => "All allies",
    /// A single party member.
    OneAlly = 4 => "One ally",
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn indices_round_trip() {
    for (i, job) in Job::ALL.iter().enumerate() {
      assert_eq!(job.index(), i);
      assert_eq!(Job::from_index(i), Some(*job));
    }
    assert_eq!(Job::from_index(12), None);
    assert_eq!(Element::ALL.len(), crate::rom::layout::NUM_ELEMENTS);
  }

  #[test]
  fn masks() {
    assert_eq!(WearLocation::Hand.mask(), 1);
    assert_eq!(WearLocation::Glove.mask(), 16);
    assert_eq!(SpellTarget::Caster.to_string(), "Self");
  }
}
