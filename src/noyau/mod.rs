//! Noyau flottant (pur, sans état de session)
//!
//! Organisation interne :
//! - erreur.rs    : erreurs de syntaxe / fenêtre (thiserror)
//! - jetons.rs    : tokenisation + glyphes + multiplication implicite
//! - rpn.rs       : shunting-yard + construction Expr (profondeur bornée)
//! - expr.rs      : AST + politique numérique + mode d’angle
//! - gamma.rs     : factorielle exacte 0..=170 + Γ (Lanczos)
//! - format.rs    : affichage d’un résultat ("Error", exponentiel, 12 chiffres)
//! - eval.rs      : pipeline complet texte -> Resultat
//! - fenetre.rs   : fenêtre de tracé + repère écran
//! - grille.rs    : pas de grille, graduations, étiquettes
//! - trace.rs     : échantillonnage + découpe en segments
//! - fonctions.rs : liste des fonctions tracées + palette

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fenetre;
pub mod fonctions;
pub mod format;
pub mod gamma;
pub mod grille;
pub mod jetons;
pub mod rpn;
pub mod trace;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{evaluer, Resultat};
pub use expr::ModeAngle;
