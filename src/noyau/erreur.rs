//! Erreurs du noyau.
//!
//! Une seule famille d’erreurs remonte à l’appelant ; le message est prêt à
//! être affiché tel quel par la coquille (UI).

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("Erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("Erreur de domaine : {0}")]
    Domaine(String),

    #[error("Division par zéro")]
    DivisionParZero,

    #[error("Identifiant inconnu : {0}")]
    IdentifiantInconnu(String),
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        Self::Domaine(msg.into())
    }

    pub fn inconnu(nom: impl Into<String>) -> Self {
        Self::IdentifiantInconnu(nom.into())
    }
}

pub type Resultat<T> = std::result::Result<T, ErreurEval>;
