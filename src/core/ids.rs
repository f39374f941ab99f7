//! Identifier types.
//!
//! Every piece of game data is referenced by a small `Copy` newtype id.
//! The engine never interprets the raw values; they are only compared
//! and hashed.
//!
//! ```
//! use form_desk::core::{FormId, FormInstanceId};
//!
//! let def = FormId::new(3);
//! assert_eq!(def.raw(), 3);
//! assert_eq!(format!("{}", FormInstanceId::new(7)), "FormInstance(7)");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a boolean game flag.
    FlagId,
    "Flag"
);

define_id!(
    /// Identifier of a form definition (the static "template" of a form).
    FormId,
    "Form"
);

define_id!(
    /// Identifier of a live form on the desk.
    ///
    /// Two instances of the same `FormId` have different instance ids.
    FormInstanceId,
    "FormInstance"
);

define_id!(
    /// Identifier of a single word block handed to the player.
    WordBlockId,
    "WordBlock"
);

define_id!(
    /// Identifier of a word block definition in the inventory.
    WordBlockDefId,
    "WordBlockDef"
);

define_id!(
    /// Inventory filter group (tab) identifier.
    FilterGroupId,
    "FilterGroup"
);

/// Monotonic id allocator.
///
/// Each manager owns one per id kind so ids never collide within a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at `first`.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Allocate the next raw id.
    pub fn next_raw(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", FlagId::new(2)), "Flag(2)");
        assert_eq!(format!("{}", FormId::new(5)), "Form(5)");
        assert_eq!(format!("{}", WordBlockDefId::new(1)), "WordBlockDef(1)");
    }

    #[test]
    fn test_allocator() {
        let mut alloc = IdAllocator::starting_at(10);
        assert_eq!(alloc.next_raw(), 10);
        assert_eq!(alloc.next_raw(), 11);

        let mut default = IdAllocator::default();
        assert_eq!(default.next_raw(), 0);
    }

    #[test]
    fn test_id_serialization() {
        let id = FormInstanceId::new(9);
        let json = serde_json::to_string(&id).unwrap();
        let back: FormInstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
