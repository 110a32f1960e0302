//! Préférences utilisateur persistées (TOML).
//!
//! Fichier : `<config_dir>/calculatrice_sci/config.toml`, créé avec les
//! valeurs par défaut s’il n’existe pas. Chaque champ a une valeur par défaut :
//! un fichier partiel reste valide.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noyau::format::{CHIFFRES_DEFAUT, CHIFFRES_MAX};
use crate::noyau::ModeAngle;

/// Historique affiché par défaut (les 20 derniers calculs).
pub const HISTORIQUE_DEFAUT: usize = 20;

/// Garde-fou : l’historique reste borné quoi qu’en dise le fichier.
pub const HISTORIQUE_MAX: usize = 200;

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("lecture de {chemin:?} impossible : {source}")]
    Lecture {
        chemin: PathBuf,
        source: std::io::Error,
    },

    #[error("écriture de {chemin:?} impossible : {source}")]
    Ecriture {
        chemin: PathBuf,
        source: std::io::Error,
    },

    #[error("config invalide : {0}")]
    Format(#[from] toml::de::Error),

    #[error("sérialisation impossible : {0}")]
    Serialisation(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mode d’angle au démarrage.
    pub mode_defaut: ModeAngle,
    /// Nombre d’entrées d’historique conservées.
    pub historique_max: usize,
    /// Décimales affichées pour un résultat réel.
    pub chiffres: usize,
    /// Filtre de journalisation (ex: "info", "calculatrice_sci=debug").
    pub niveau_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode_defaut: ModeAngle::Degres,
            historique_max: HISTORIQUE_DEFAUT,
            chiffres: CHIFFRES_DEFAUT,
            niveau_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn chemin() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calculatrice_sci")
            .join("config.toml")
    }

    /// Charge la config utilisateur ; la crée avec les défauts si absente.
    pub fn charger() -> Result<Self, ErreurConfig> {
        let chemin = Self::chemin();

        if !chemin.exists() {
            let defaut = Config::default();
            defaut.sauvegarder_vers(&chemin)?;
            return Ok(defaut);
        }

        Self::charger_depuis(&chemin)
    }

    pub fn charger_depuis(chemin: &Path) -> Result<Self, ErreurConfig> {
        let contenu = fs::read_to_string(chemin).map_err(|source| ErreurConfig::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contenu)?;
        Ok(config.bornee())
    }

    pub fn sauvegarder_vers(&self, chemin: &Path) -> Result<(), ErreurConfig> {
        let ecriture = |source| ErreurConfig::Ecriture {
            chemin: chemin.to_path_buf(),
            source,
        };

        if let Some(parent) = chemin.parent() {
            fs::create_dir_all(parent).map_err(ecriture)?;
        }
        let contenu = toml::to_string(self)?;
        fs::write(chemin, contenu).map_err(ecriture)
    }

    /// Ramène chaque champ dans ses bornes.
    pub fn bornee(mut self) -> Self {
        self.historique_max = self.historique_max.clamp(1, HISTORIQUE_MAX);
        self.chiffres = self.chiffres.min(CHIFFRES_MAX);
        self
    }
}
