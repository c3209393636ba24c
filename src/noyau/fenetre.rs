// src/noyau/fenetre.rs
//
// Fenêtre de tracé (4 bornes) + passage repère math <-> repère écran.
// Invariant : x_min < x_max et y_min < y_max, bornes finies.
// Toute modification est atomique : refusée => fenêtre inchangée.

use serde::{Deserialize, Serialize};

use super::erreur::ErreurCalcul;

/// Bornes brutes (désérialisation, saisie UI) : pas encore validées.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bornes {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Bornes", into = "Bornes")]
pub struct Fenetre {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Default for Fenetre {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }
}

fn bornes_valides(b: &Bornes) -> bool {
    [b.x_min, b.x_max, b.y_min, b.y_max]
        .iter()
        .all(|v| v.is_finite())
        && b.x_min < b.x_max
        && b.y_min < b.y_max
}

impl TryFrom<Bornes> for Fenetre {
    type Error = ErreurCalcul;

    fn try_from(b: Bornes) -> Result<Self, Self::Error> {
        if !bornes_valides(&b) {
            return Err(ErreurCalcul::FenetreInvalide);
        }
        Ok(Self {
            x_min: b.x_min,
            x_max: b.x_max,
            y_min: b.y_min,
            y_max: b.y_max,
        })
    }
}

impl From<Fenetre> for Bornes {
    fn from(f: Fenetre) -> Self {
        f.bornes()
    }
}

impl Fenetre {
    #[cfg(test)]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ErreurCalcul> {
        Self::try_from(Bornes {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Mise à jour atomique des 4 bornes.
    pub fn modifier(&mut self, b: Bornes) -> Result<(), ErreurCalcul> {
        *self = Self::try_from(b)?;
        Ok(())
    }

    pub fn bornes(&self) -> Bornes {
        Bornes {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }
    pub fn x_max(&self) -> f64 {
        self.x_max
    }
    pub fn y_min(&self) -> f64 {
        self.y_min
    }
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn etendue_x(&self) -> f64 {
        self.x_max - self.x_min
    }
    pub fn etendue_y(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// x math -> colonne écran (0 à gauche).
    pub fn vers_ecran_x(&self, x: f64, largeur: f64) -> f64 {
        (x - self.x_min) / self.etendue_x() * largeur
    }

    /// y math -> ligne écran (0 en haut, axe inversé).
    pub fn vers_ecran_y(&self, y: f64, hauteur: f64) -> f64 {
        hauteur - (y - self.y_min) / self.etendue_y() * hauteur
    }

    /// Colonne écran -> x math.
    pub fn depuis_ecran_x(&self, px: f64, largeur: f64) -> f64 {
        self.x_min + px * self.etendue_x() / largeur
    }

    pub fn contient_zero_x(&self) -> bool {
        self.x_min <= 0.0 && self.x_max >= 0.0
    }

    pub fn contient_zero_y(&self) -> bool {
        self.y_min <= 0.0 && self.y_max >= 0.0
    }
}
