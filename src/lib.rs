//! Calculatrice scientifique : noyau d’évaluation pur, session (Ans, mémoire,
//! historique), préférences TOML.
//!
//! L’interface egui vit dans le binaire (src/main.rs + src/app/).

pub mod config;
pub mod noyau;
pub mod session;

pub use config::{Config, ErreurConfig};
pub use noyau::{evaluate, ErreurEval, ModeAngle, Valeur};
pub use session::{EntreeHistorique, Session};
