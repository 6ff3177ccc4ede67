#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! mapforge: declarative trigger, team and script builder for RTS map files.
//!
//! A [`Template`] fills a [`Registry`] through fluent record builders; the registry then
//! renders everything into INI sections, either as a fresh file ([`Registry::compile`]) or
//! merged into an existing map ([`Registry::append`]).
//!
//! ```
//! use mapforge::{Action, Condition, Registry};
//! use mapforge_data::House;
//!
//! let soviets = House::new("Russians", 1);
//! let mut registry = Registry::new();
//! registry
//!     .create_trigger()
//!     .name("Win")
//!     .owner(&soviets)
//!     .on(Condition::elapsed_time(3))
//!     .act(Action::declare_winner(&soviets));
//!
//! let doc = registry.render_document().unwrap();
//! assert_eq!(doc.get("Triggers", "03A00001"), Some("Russians,<none>,Win,0,1,1,1,0"));
//! assert_eq!(doc.get("Actions", "03A00001"), Some("1,1,0,1,0,0,0,0,A"));
//! ```

pub const MAPFORGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Declares a fieldless kind enum together with its `(opcode, parameter tag)` table.
macro_rules! opcode_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($opcode:literal, $tag:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every kind, in table order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            pub const fn opcode(self) -> u16 {
                match self {
                    $( $name::$variant => $opcode, )+
                }
            }

            /// Tells the engine how to read the parameter fields.
            pub const fn param_tag(self) -> u8 {
                match self {
                    $( $name::$variant => $tag, )+
                }
            }
        }
    };
}

pub mod action;
pub mod catalog;
pub mod cell;
pub mod compile;
pub mod condition;
pub mod config;
pub mod error;
pub mod graph;
pub mod idgen;
pub mod ini;
pub mod record;
pub mod registry;
pub mod samples;
pub mod script;
pub mod taskforce;
pub mod team;
pub mod template;
pub mod trigger;
pub mod validate;

pub use action::{Action, ActionKind, ActionParam};
pub use condition::{Condition, ConditionKind, ConditionParam};
pub use config::ForgeConfig;
pub use error::{ForgeError, Result};
pub use idgen::{IdGenerator, Identifier, Namespace};
pub use ini::{IniDocument, Section};
pub use registry::{Registry, ScriptRef, TaskForceRef, TeamRef, TriggerRef};
pub use script::{ScriptBuilder, ScriptOp, UnitScript};
pub use taskforce::{TaskForce, TaskForceBuilder};
pub use team::{Team, TeamBuilder};
pub use template::{Template, TemplateRunner};
pub use trigger::{Trigger, TriggerBuilder};
