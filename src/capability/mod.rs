//! Capability views over arbitrary domain objects.
//!
//! A capability view is a narrow read contract exposing one facet of an object:
//! its name, its location, its time-to-live, and so on. A domain object may expose
//! any number of them. Callers never inspect concrete types; instead every object
//! handed to the pipeline implements [`MacroSource`], whose `as_*` accessors return
//! `Some(view)` for each capability the object has.
//!
//! ```rust
//! use macromsg::capability::{MacroSource, Nameable, Quantifiable};
//!
//! struct Stack {
//!     item: String,
//!     amount: i64,
//! }
//!
//! impl Nameable for Stack {
//!     fn name(&self) -> String {
//!         self.item.clone()
//!     }
//! }
//!
//! impl Quantifiable for Stack {
//!     fn quantity(&self) -> i64 {
//!         self.amount
//!     }
//! }
//!
//! impl MacroSource for Stack {
//!     fn as_nameable(&self) -> Option<&dyn Nameable> {
//!         Some(self)
//!     }
//!
//!     fn as_quantifiable(&self) -> Option<&dyn Quantifiable> {
//!         Some(self)
//!     }
//! }
//! ```

mod json;

pub use json::JsonSource;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// A position in a named world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// World name; `None` when the world is unknown or unloaded.
    #[serde(default)]
    pub world: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: Option<&str>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.map(str::to_string),
            x,
            y,
            z,
        }
    }

    /// Coordinates truncated toward zero.
    pub fn block_coordinates(&self) -> (i64, i64, i64) {
        (self.x.trunc() as i64, self.y.trunc() as i64, self.z.trunc() as i64)
    }
}

/// A participant referenced by another object (owner, killer, looter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    #[serde(default)]
    pub uuid: Option<Uuid>,
}

impl Actor {
    pub fn new(name: impl Into<String>, uuid: Option<Uuid>) -> Self {
        Self {
            name: name.into(),
            uuid,
        }
    }
}

pub trait PluralNameable {
    fn plural_name(&self) -> String;
}

pub trait DisplayNameable {
    fn display_name(&self) -> String;
}

pub trait Nameable {
    fn name(&self) -> String;
}

/// Objects with a length of time, such as a configured lifetime.
pub trait Durationable {
    fn duration(&self) -> Duration;
}

/// Objects that stop being valid at a point in time.
pub trait Expirable {
    fn expiration(&self) -> DateTime<Utc>;
}

/// Objects tied to a single point in time (creation, death, ...).
pub trait Instantable {
    fn instant(&self) -> DateTime<Utc>;
}

pub trait Ownable {
    fn owner(&self) -> Actor;
}

pub trait Killable {
    fn killer(&self) -> Actor;
}

pub trait Lootable {
    fn looter(&self) -> Actor;
}

pub trait Locatable {
    fn location(&self) -> Location;
}

pub trait Quantifiable {
    fn quantity(&self) -> i64;
}

/// Objects shielded from others until their protection runs out.
pub trait Protectable {
    fn protection_expiration(&self) -> DateTime<Utc>;
}

pub trait Identifiable {
    fn uuid(&self) -> Uuid;
}

pub trait Linkable {
    fn url(&self) -> String;
}

pub trait Versioned {
    fn version(&self) -> String;
}

/// An object that can be queried for capabilities.
///
/// Every accessor defaults to `None`; implementors override the ones they support,
/// usually by returning `Some(self)`. The adapter layer is the only caller.
pub trait MacroSource: Send + Sync {
    fn as_plural_nameable(&self) -> Option<&dyn PluralNameable> {
        None
    }

    fn as_display_nameable(&self) -> Option<&dyn DisplayNameable> {
        None
    }

    fn as_nameable(&self) -> Option<&dyn Nameable> {
        None
    }

    fn as_durationable(&self) -> Option<&dyn Durationable> {
        None
    }

    fn as_expirable(&self) -> Option<&dyn Expirable> {
        None
    }

    fn as_instantable(&self) -> Option<&dyn Instantable> {
        None
    }

    fn as_ownable(&self) -> Option<&dyn Ownable> {
        None
    }

    fn as_killable(&self) -> Option<&dyn Killable> {
        None
    }

    fn as_lootable(&self) -> Option<&dyn Lootable> {
        None
    }

    fn as_locatable(&self) -> Option<&dyn Locatable> {
        None
    }

    fn as_quantifiable(&self) -> Option<&dyn Quantifiable> {
        None
    }

    fn as_protectable(&self) -> Option<&dyn Protectable> {
        None
    }

    fn as_identifiable(&self) -> Option<&dyn Identifiable> {
        None
    }

    fn as_linkable(&self) -> Option<&dyn Linkable> {
        None
    }

    fn as_versioned(&self) -> Option<&dyn Versioned> {
        None
    }
}
