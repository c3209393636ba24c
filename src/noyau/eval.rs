//! Noyau — évaluation (pipeline réel)
//!
//! texte -> jetons (glyphes, noms, multiplication implicite) -> RPN -> Expr -> f64 -> Resultat
//!
//! Aucune erreur ne traverse la frontière du noyau sous forme de panique :
//! tout finit en `Resultat`, que le formateur transforme en texte ("Error" au besoin).

use std::fmt;

use tracing::debug;

use super::erreur::ErreurCalcul;
use super::expr::{Expr, ModeAngle};
use super::format::{format_nombre, TEXTE_ERREUR};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Résultat d’évaluation : une valeur finie, ou la nature de l’échec.
#[derive(Clone, Debug, PartialEq)]
pub enum Resultat {
    Valeur(f64),
    NonNombre,
    Infini { negatif: bool },
    Malforme(ErreurCalcul),
}

impl Resultat {
    pub fn depuis_f64(v: f64) -> Self {
        if v.is_nan() {
            Resultat::NonNombre
        } else if v.is_infinite() {
            Resultat::Infini { negatif: v < 0.0 }
        } else {
            Resultat::Valeur(v)
        }
    }

    pub fn valeur(&self) -> Option<f64> {
        match self {
            Resultat::Valeur(v) => Some(*v),
            _ => None,
        }
    }

    pub fn est_erreur(&self) -> bool {
        !matches!(self, Resultat::Valeur(_))
    }
}

impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resultat::Valeur(v) => f.write_str(&format_nombre(*v)),
            _ => f.write_str(TEXTE_ERREUR),
        }
    }
}

/// Texte -> arbre évaluable. Toute la validation syntaxique se fait ici,
/// avant le moindre calcul.
pub fn compiler(texte: &str) -> Result<Expr, ErreurCalcul> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::EntreeVide);
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_rpn(&rpn),
        "compilation de {s:?}"
    );
    from_rpn(&rpn)
}

/// Évalue une expression sans variable (calculatrice scientifique).
pub fn evaluer(texte: &str, mode: ModeAngle) -> Resultat {
    match compiler(texte) {
        Ok(expr) if expr.contient_x() => {
            debug!("évaluation refusée pour {texte:?}: x sans valeur");
            Resultat::Malforme(ErreurCalcul::VariableSansValeur)
        }
        Ok(expr) => Resultat::depuis_f64(expr.eval(0.0, mode)),
        Err(e) => {
            debug!("expression malformée {texte:?}: {e}");
            Resultat::Malforme(e)
        }
    }
}

/// Évalue une expression en x (f(x) ponctuel).
#[cfg(test)]
pub fn evaluer_en(texte: &str, x: f64, mode: ModeAngle) -> Resultat {
    match compiler(texte) {
        Ok(expr) => Resultat::depuis_f64(expr.eval(x, mode)),
        Err(e) => {
            debug!("expression malformée {texte:?}: {e}");
            Resultat::Malforme(e)
        }
    }
}

/// Évalue et formate directement pour l’affichage.
#[cfg(test)]
pub fn evaluer_affichage(texte: &str, mode: ModeAngle) -> String {
    evaluer(texte, mode).to_string()
}
