// src/noyau/fonctions.rs
//
// Liste des fonctions tracées.
// - paire immuable (texte, couleur)
// - couleur prise dans une palette fixe de 8, selon la taille de la liste à l’ajout
// - pas de doublon (comparaison exacte du texte)

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Couleur {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Couleur {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Palette du grapheur (bleu, vert, rouge, orange, violet, sarcelle, rose, cyan).
pub const PALETTE: [Couleur; 8] = [
    Couleur::rgb(0x4a, 0x90, 0xd9),
    Couleur::rgb(0x2e, 0xcc, 0x71),
    Couleur::rgb(0xe7, 0x4c, 0x3c),
    Couleur::rgb(0xf3, 0x9c, 0x12),
    Couleur::rgb(0x9b, 0x59, 0xb6),
    Couleur::rgb(0x1a, 0xbc, 0x9c),
    Couleur::rgb(0xe9, 0x1e, 0x63),
    Couleur::rgb(0x00, 0xbc, 0xd4),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FonctionTracee {
    texte: String,
    couleur: Couleur,
}

impl FonctionTracee {
    pub fn texte(&self) -> &str {
        &self.texte
    }

    pub fn couleur(&self) -> Couleur {
        self.couleur
    }
}

/// Issue d’un ajout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ajout {
    Ajoutee,
    Vide,
    Doublon,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeFonctions {
    entrees: Vec<FonctionTracee>,
}

impl ListeFonctions {
    /// Ajoute `texte` (ignoré si vide ou déjà présent).
    pub fn ajouter(&mut self, texte: &str) -> Ajout {
        if texte.trim().is_empty() {
            return Ajout::Vide;
        }
        if self.entrees.iter().any(|f| f.texte == texte) {
            return Ajout::Doublon;
        }

        let couleur = PALETTE[self.entrees.len() % PALETTE.len()];
        self.entrees.push(FonctionTracee {
            texte: texte.to_string(),
            couleur,
        });
        Ajout::Ajoutee
    }

    pub fn retirer(&mut self, index: usize) -> Option<FonctionTracee> {
        (index < self.entrees.len()).then(|| self.entrees.remove(index))
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FonctionTracee> {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn couleurs_cycliques() {
        let mut l = ListeFonctions::default();
        for k in 0..10 {
            assert_eq!(l.ajouter(&format!("x+{k}")), Ajout::Ajoutee);
        }
        let couleurs: Vec<Couleur> = l.iter().map(|f| f.couleur()).collect();
        assert_eq!(couleurs[0], PALETTE[0]);
        assert_eq!(couleurs[7], PALETTE[7]);
        assert_eq!(couleurs[8], PALETTE[0]);
        assert_eq!(couleurs[9], PALETTE[1]);
    }

    #[test]
    fn doublons_et_vides() {
        let mut l = ListeFonctions::default();
        assert_eq!(l.ajouter("sin(x)"), Ajout::Ajoutee);
        assert_eq!(l.ajouter("sin(x)"), Ajout::Doublon);
        // comparaison exacte : un espace suffit à distinguer
        assert_eq!(l.ajouter("sin( x)"), Ajout::Ajoutee);
        assert_eq!(l.ajouter("   "), Ajout::Vide);
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn retrait_et_vidage() {
        let mut l = ListeFonctions::default();
        l.ajouter("x");
        l.ajouter("x^2");
        l.ajouter("x^3");

        let retiree = l.retirer(1).unwrap();
        assert_eq!(retiree.texte(), "x^2");
        assert_eq!(l.retirer(5), None);
        assert_eq!(
            l.iter().map(|f| f.texte()).collect::<Vec<_>>(),
            vec!["x", "x^3"]
        );

        // couleur selon la taille courante (comme à l’ajout)
        l.ajouter("x^4");
        assert_eq!(l.iter().last().map(|f| f.couleur()), Some(PALETTE[2]));

        l.vider();
        assert!(l.is_empty());
    }
}
