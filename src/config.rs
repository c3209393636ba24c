//! Réglages utilisateur (fichier TOML optionnel)

use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use tracing::{info, warn};

use crate::noyau::fenetre::Fenetre;
use crate::noyau::ModeAngle;

/// Réglages lus au démarrage. Tout champ absent prend sa valeur par défaut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reglages {
    /// Fenêtre de tracé au premier lancement (et bouton "Réinitialiser").
    #[serde(default)]
    pub fenetre_defaut: Fenetre,

    /// Mode d’angle de l’onglet scientifique.
    #[serde(default = "mode_angle_defaut")]
    pub mode_angle: ModeAngle,

    /// Épaisseur des courbes (points).
    #[serde(default = "epaisseur_defaut")]
    pub epaisseur_trait: f32,

    /// Rouvrir le dernier onglet actif.
    #[serde(default = "vrai")]
    pub restaurer_onglet: bool,
}

fn mode_angle_defaut() -> ModeAngle {
    ModeAngle::Degres
}

fn epaisseur_defaut() -> f32 {
    2.0
}

fn vrai() -> bool {
    true
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            fenetre_defaut: Fenetre::default(),
            mode_angle: mode_angle_defaut(),
            epaisseur_trait: epaisseur_defaut(),
            restaurer_onglet: vrai(),
        }
    }
}

impl Reglages {
    /// Charge le fichier de réglages, ou les valeurs par défaut.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let chemin = Self::config_path();

        if chemin.exists() {
            match std::fs::read_to_string(&chemin) {
                Ok(contenu) => match Self::depuis_toml(&contenu) {
                    Ok(r) => {
                        info!("réglages chargés depuis {:?}", chemin);
                        return r;
                    }
                    Err(e) => warn!("réglages illisibles ({:?}): {}", chemin, e),
                },
                Err(e) => warn!("lecture des réglages impossible: {}", e),
            }
        }

        info!("réglages par défaut");
        Self::default()
    }

    /// Web : pas de fichier, valeurs par défaut.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn depuis_toml(contenu: &str) -> Result<Self, toml::de::Error> {
        let mut r: Self = toml::from_str(contenu)?;
        if !(r.epaisseur_trait.is_finite() && r.epaisseur_trait > 0.0) {
            warn!("epaisseur_trait invalide ({}), retour à 2.0", r.epaisseur_trait);
            r.epaisseur_trait = epaisseur_defaut();
        }
        Ok(r)
    }

    /// $XDG_CONFIG_HOME/calculatrice-graphe/config.toml (repli : ~/.config).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn config_path() -> PathBuf {
        let dossier = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("/"))
                    .join(".config")
            });

        dossier.join("calculatrice-graphe").join("config.toml")
    }
}
