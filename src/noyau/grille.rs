// src/noyau/grille.rs
//
// Grille du grapheur :
// - pas "rond" (1, 2 ou 5 × 10^k) choisi par axe à partir de l’étendue visible
// - graduations k·pas dans la fenêtre (k entier : pas de dérive par additions successives)
// - étiquettes : exponentielle 0 décimale si |v| >= 1000 ou 0 < |v| < 0.01, sinon 3 chiffres
// - plan complet en coordonnées écran (lignes, axes, étiquettes, origine)

use super::fenetre::Fenetre;
use super::format::{arrondi_significatif, format_exponentiel};

/// Garde-fou : jamais plus de graduations que ça par axe.
const GRADUATIONS_MAX: usize = 1000;

/// Décalage (px) des étiquettes par rapport à l’axe ou au bord.
pub const MARGE_ETIQUETTE: f64 = 5.0;

/// Pas de grille pour une étendue > 0 (None si étendue invalide).
///
/// magnitude = 10^floor(log10(étendue)), normalisé = étendue / magnitude
/// - normalisé <= 2 -> magnitude / 5
/// - normalisé <= 5 -> magnitude / 2
/// - sinon          -> magnitude
pub fn pas_grille(etendue: f64) -> Option<f64> {
    if !etendue.is_finite() || etendue <= 0.0 {
        return None;
    }

    let magnitude = 10f64.powf(etendue.log10().floor());
    let normalise = etendue / magnitude;

    let pas = if normalise <= 2.0 {
        magnitude / 5.0
    } else if normalise <= 5.0 {
        magnitude / 2.0
    } else {
        magnitude
    };

    (pas.is_finite() && pas > 0.0).then_some(pas)
}

/// Multiples entiers de `pas` dans [min, max], sous forme (k, k·pas).
pub fn graduations(min: f64, max: f64, pas: f64) -> Vec<(i64, f64)> {
    if pas.is_nan() || pas <= 0.0 || !min.is_finite() || !max.is_finite() || min > max {
        return Vec::new();
    }

    let k_debut = (min / pas).ceil();
    let k_fin = (max / pas).floor();
    if !(k_fin - k_debut).is_finite() || k_fin < k_debut {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut k = k_debut;
    while k <= k_fin && out.len() < GRADUATIONS_MAX {
        out.push((k as i64, k * pas));
        k += 1.0;
    }
    out
}

/// Étiquette d’une graduation.
pub fn etiquette(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if a >= 1000.0 || a < 0.01 {
        return format_exponentiel(v, 0);
    }
    format!("{}", arrondi_significatif(v, 3))
}

/// Une ligne de grille : valeur math, position écran, étiquette (absente pour 0).
#[derive(Clone, Debug, PartialEq)]
pub struct Graduation {
    pub valeur: f64,
    pub position: f64,
    pub etiquette: Option<String>,
}

/// Tout ce qu’il faut pour dessiner le fond du grapheur.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanGrille {
    pub pas_x: f64,
    pub pas_y: f64,

    /// lignes verticales (position = colonne écran)
    pub verticales: Vec<Graduation>,
    /// lignes horizontales (position = ligne écran)
    pub horizontales: Vec<Graduation>,

    /// ligne écran de l’axe des x (y = 0), si visible
    pub axe_x: Option<f64>,
    /// colonne écran de l’axe des y (x = 0), si visible
    pub axe_y: Option<f64>,

    /// ligne écran où poser les étiquettes des x
    pub ligne_etiquettes_x: f64,
    /// colonne écran où poser les étiquettes des y
    pub colonne_etiquettes_y: f64,

    /// position de l’étiquette "0" quand l’origine est visible
    pub origine: Option<(f64, f64)>,
}

fn graduations_axe(
    min: f64,
    max: f64,
    pas: f64,
    vers_ecran: impl Fn(f64) -> f64,
) -> Vec<Graduation> {
    graduations(min, max, pas)
        .into_iter()
        .map(|(k, v)| Graduation {
            valeur: v,
            position: vers_ecran(v),
            etiquette: (k != 0).then(|| etiquette(v)),
        })
        .collect()
}

/// Plan de grille pour une fenêtre et une surface (pixels).
pub fn planifier(fenetre: &Fenetre, largeur: f64, hauteur: f64) -> PlanGrille {
    let pas_x = pas_grille(fenetre.etendue_x()).unwrap_or(1.0);
    let pas_y = pas_grille(fenetre.etendue_y()).unwrap_or(1.0);

    let verticales = graduations_axe(fenetre.x_min(), fenetre.x_max(), pas_x, |x| {
        fenetre.vers_ecran_x(x, largeur)
    });
    let horizontales = graduations_axe(fenetre.y_min(), fenetre.y_max(), pas_y, |y| {
        fenetre.vers_ecran_y(y, hauteur)
    });

    let axe_x = fenetre
        .contient_zero_y()
        .then(|| fenetre.vers_ecran_y(0.0, hauteur));
    let axe_y = fenetre
        .contient_zero_x()
        .then(|| fenetre.vers_ecran_x(0.0, largeur));

    let ligne_etiquettes_x = match axe_x {
        Some(y) => y + MARGE_ETIQUETTE,
        None => hauteur - MARGE_ETIQUETTE,
    };
    let colonne_etiquettes_y = match axe_y {
        Some(x) => x + MARGE_ETIQUETTE,
        None => MARGE_ETIQUETTE,
    };

    let origine = match (axe_y, axe_x) {
        (Some(x), Some(y)) => Some((x + MARGE_ETIQUETTE, y + MARGE_ETIQUETTE)),
        _ => None,
    };

    PlanGrille {
        pas_x,
        pas_y,
        verticales,
        horizontales,
        axe_x,
        axe_y,
        ligne_etiquettes_x,
        colonne_etiquettes_y,
        origine,
    }
}
