//! Access errors.

use std::fmt;

use oneof_index::{TypeList, VALUELESS};
use thiserror::Error;

/// What a variant held when an access was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Active {
    Valueless,
    Holding {
        ordinal: usize,
        type_name: &'static str,
    },
}

impl Active {
    pub(crate) fn of<L: TypeList>(index: usize) -> Self {
        if index == VALUELESS {
            return Active::Valueless;
        }
        Active::Holding {
            ordinal: index,
            type_name: L::type_name(index).unwrap_or_default(),
        }
    }
}

impl fmt::Display for Active {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Active::Valueless => f.write_str("the variant is valueless"),
            Active::Holding { ordinal, type_name } => {
                write!(f, "the variant holds alternative {ordinal} (`{type_name}`)")
            }
        }
    }
}

/// A checked accessor asked for an alternative the variant does not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("bad variant access: requested alternative {requested} (`{requested_type}`), but {active}")]
pub struct BadAccess {
    requested: usize,
    requested_type: &'static str,
    active: Active,
}

impl BadAccess {
    pub(crate) fn new<T>(requested: usize, active: Active) -> Self {
        BadAccess {
            requested,
            requested_type: std::any::type_name::<T>(),
            active,
        }
    }

    /// Ordinal the caller asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Type name of the requested alternative.
    pub fn requested_type(&self) -> &'static str {
        self.requested_type
    }

    /// What the variant held instead.
    pub fn active(&self) -> Active {
        self.active
    }
}
