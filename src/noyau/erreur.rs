// src/noyau/erreur.rs
//
// Erreurs du noyau (syntaxe + fenêtre).
// Les erreurs de domaine (ln(-1), asin(2), 0/0) ne passent PAS par ici :
// elles deviennent NaN / ±inf et c’est le formateur qui affiche "Error".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error("entrée vide")]
    EntreeVide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("identifiant inconnu: {0}")]
    IdentInconnu(String),

    #[error("fonction sans parenthèse: {0}")]
    FonctionSansParenthese(String),

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,

    #[error("opérande manquant")]
    OperandeManquant,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("variable x sans valeur")]
    VariableSansValeur,

    #[error("imbrication trop profonde (max {0})")]
    TropProfond(usize),

    #[error("fenêtre invalide: min doit être < max sur chaque axe")]
    FenetreInvalide,
}
