//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : machines à états des trois onglets (standard, scientifique, grapheur)
//! et ce qui survit d’une session à l’autre. Aucun dessin ici.
//!
//! Contrats :
//! - Le calcul passe par le noyau (scientifique, grapheur) ; le standard fait
//!   ses quatre opérations lui-même, en exécution immédiate.
//! - Actions déterministes, sans effet de bord caché : testables sans egui.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Reglages;
use crate::noyau::eval::compiler;
use crate::noyau::fenetre::{Bornes, Fenetre};
use crate::noyau::fonctions::{Ajout, ListeFonctions};
use crate::noyau::format::{format_exponentiel, format_nombre, TEXTE_ERREUR};
use crate::noyau::{evaluer, ModeAngle, Resultat};

/// Nombre maximal de chiffres saisis (standard).
const CHIFFRES_MAX: usize = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Onglet {
    #[default]
    Standard,
    Scientifique,
    Graphique,
}

impl Onglet {
    pub const TOUS: [Onglet; 3] = [Onglet::Standard, Onglet::Scientifique, Onglet::Graphique];

    pub fn titre(self) -> &'static str {
        match self {
            Onglet::Standard => "Standard",
            Onglet::Scientifique => "Scientifique",
            Onglet::Graphique => "Grapheur",
        }
    }
}

/* ------------------------ Standard ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpStd {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl OpStd {
    pub fn glyphe(self) -> &'static str {
        match self {
            OpStd::Plus => "+",
            OpStd::Moins => "−",
            OpStd::Fois => "×",
            OpStd::Divise => "÷",
        }
    }

    fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(OpStd::Plus),
            '-' => Some(OpStd::Moins),
            '*' => Some(OpStd::Fois),
            '/' => Some(OpStd::Divise),
            _ => None,
        }
    }
}

/// Texte d’un résultat standard (réutilisé tel quel comme opérande).
fn texte_resultat(v: f64) -> String {
    if v.is_finite() {
        format!("{v}")
    } else {
        TEXTE_ERREUR.to_string()
    }
}

/// Affichage d’un opérande standard : la saisie reste telle quelle ("0.", "12.50"),
/// sauf grandes/petites magnitudes et plus de 10 décimales.
pub fn format_saisie(texte: &str) -> String {
    if texte == TEXTE_ERREUR {
        return texte.to_string();
    }
    let Ok(v) = texte.parse::<f64>() else {
        return "0".to_string();
    };
    if !v.is_finite() {
        return TEXTE_ERREUR.to_string();
    }
    if v.abs() > 1e12 || (v != 0.0 && v.abs() < 1e-10) {
        return format_exponentiel(v, 6);
    }
    match texte.split_once('.') {
        Some((_, dec)) if dec.len() > 10 => format!("{v:.10}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        _ => texte.to_string(),
    }
}

/// Calculatrice quatre opérations à exécution immédiate.
#[derive(Clone, Debug)]
pub struct EtatStandard {
    courant: String,
    precedent: String,
    operateur: Option<OpStd>,
    /// prochain chiffre : remplace l’opérande au lieu de le prolonger
    a_remettre: bool,
    expression: String,
}

impl Default for EtatStandard {
    fn default() -> Self {
        Self {
            courant: "0".to_string(),
            precedent: String::new(),
            operateur: None,
            a_remettre: false,
            expression: String::new(),
        }
    }
}

impl EtatStandard {
    pub fn affichage(&self) -> String {
        format_saisie(&self.courant)
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Opérande en cours, tel que saisi.
    #[cfg(test)]
    pub fn courant(&self) -> &str {
        &self.courant
    }

    pub fn chiffre(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if self.a_remettre {
            self.courant = c.to_string();
            self.a_remettre = false;
        } else if self.courant == "0" {
            self.courant = c.to_string();
        } else if self.courant.chars().filter(char::is_ascii_digit).count() < CHIFFRES_MAX {
            self.courant.push(c);
        }
    }

    pub fn virgule(&mut self) {
        if self.a_remettre {
            self.courant = "0.".to_string();
            self.a_remettre = false;
        } else if !self.courant.contains('.') {
            self.courant.push('.');
        }
    }

    pub fn operateur(&mut self, op: OpStd) {
        if self.operateur.is_some() && !self.a_remettre {
            self.egal();
        }
        self.precedent = self.courant.clone();
        self.operateur = Some(op);
        self.a_remettre = true;
        self.expression = format!("{} {}", format_saisie(&self.precedent), op.glyphe());
    }

    pub fn egal(&mut self) {
        let Some(op) = self.operateur else {
            return;
        };
        if self.a_remettre {
            return;
        }

        let a = self.precedent.parse::<f64>().unwrap_or(f64::NAN);
        let b = self.courant.parse::<f64>().unwrap_or(f64::NAN);

        let r = match op {
            OpStd::Plus => a + b,
            OpStd::Moins => a - b,
            OpStd::Fois => a * b,
            OpStd::Divise if b == 0.0 => {
                debug!("standard: division par zéro");
                self.courant = TEXTE_ERREUR.to_string();
                self.expression.clear();
                self.operateur = None;
                self.precedent.clear();
                self.a_remettre = true;
                return;
            }
            OpStd::Divise => a / b,
        };

        self.expression = format!(
            "{} {} {} =",
            format_saisie(&self.precedent),
            op.glyphe(),
            format_saisie(&self.courant)
        );
        self.courant = texte_resultat(r);
        self.operateur = None;
        self.precedent.clear();
        self.a_remettre = true;
    }

    pub fn effacer(&mut self) {
        *self = Self::default();
    }

    pub fn retour(&mut self) {
        if self.a_remettre || self.courant == TEXTE_ERREUR {
            self.effacer();
            return;
        }
        self.courant.pop();
        if self.courant.is_empty() || self.courant == "-" {
            self.courant = "0".to_string();
        }
    }

    pub fn oppose(&mut self) {
        if self.courant == "0" || self.courant == TEXTE_ERREUR {
            return;
        }
        self.courant = match self.courant.strip_prefix('-') {
            Some(reste) => reste.to_string(),
            None => format!("-{}", self.courant),
        };
    }

    pub fn pourcent(&mut self) {
        let v = self.courant.parse::<f64>().unwrap_or(f64::NAN);
        self.courant = texte_resultat(v / 100.0);
    }

    /// Touche clavier (texte). `false` si la touche ne concerne pas cet onglet.
    pub fn touche(&mut self, c: char) -> bool {
        match c {
            '0'..='9' => self.chiffre(c),
            '.' => self.virgule(),
            '=' => self.egal(),
            '%' => self.pourcent(),
            'c' | 'C' => self.effacer(),
            _ => match OpStd::depuis_char(c) {
                Some(op) => self.operateur(op),
                None => return false,
            },
        }
        true
    }
}

/* ------------------------ Scientifique ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpSci {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
}

impl OpSci {
    pub fn glyphe(self) -> char {
        match self {
            OpSci::Plus => '+',
            OpSci::Moins => '−',
            OpSci::Fois => '×',
            OpSci::Divise => '÷',
            OpSci::Puissance => '^',
        }
    }

    fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(OpSci::Plus),
            '-' => Some(OpSci::Moins),
            '*' => Some(OpSci::Fois),
            '/' => Some(OpSci::Divise),
            '^' => Some(OpSci::Puissance),
            _ => None,
        }
    }
}

const GLYPHES_OP: [char; 5] = ['+', '−', '×', '÷', '^'];

/// Touches de fonction du pavé scientifique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToucheFonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Carre,
    Factorielle,
}

impl ToucheFonction {
    /// Texte inséré dans l’expression.
    pub fn texte(self) -> &'static str {
        match self {
            ToucheFonction::Sin => "sin(",
            ToucheFonction::Cos => "cos(",
            ToucheFonction::Tan => "tan(",
            ToucheFonction::Asin => "asin(",
            ToucheFonction::Acos => "acos(",
            ToucheFonction::Atan => "atan(",
            ToucheFonction::Log => "log(",
            ToucheFonction::Ln => "ln(",
            ToucheFonction::Sqrt => "sqrt(",
            ToucheFonction::Carre => "^2",
            ToucheFonction::Factorielle => "!",
        }
    }

    /// Postfixe : s’applique au dernier résultat si l’expression est vide.
    fn postfixe(self) -> bool {
        matches!(self, ToucheFonction::Carre | ToucheFonction::Factorielle)
    }
}

/// Préfixes retirés d’un bloc par le retour arrière (les plus longs d’abord).
const BLOCS_FONCTION: [&str; 9] = [
    "asin(", "acos(", "atan(", "sqrt(", "sin(", "cos(", "tan(", "log(", "ln(",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

/// Pavé scientifique : une expression en cours + le dernier résultat,
/// réévalué à chaque saisie qui peut le changer.
#[derive(Clone, Debug)]
pub struct EtatScientifique {
    expression: String,
    dernier: Resultat,
    /// "expr =" juste après un calcul
    historique: Option<String>,
    mode: ModeAngle,
}

impl EtatScientifique {
    pub fn new(mode: ModeAngle) -> Self {
        Self {
            expression: String::new(),
            dernier: Resultat::Valeur(0.0),
            historique: None,
            mode,
        }
    }

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ModeAngle) {
        self.mode = mode;
        if !self.expression.is_empty() {
            self.reevaluer();
        }
    }

    #[cfg(test)]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Ligne du haut : l’expression en cours, sinon le dernier calcul.
    pub fn ligne(&self) -> &str {
        if self.expression.is_empty() {
            self.historique.as_deref().unwrap_or("")
        } else {
            &self.expression
        }
    }

    pub fn affichage(&self) -> String {
        self.dernier.to_string()
    }

    pub fn dernier(&self) -> &Resultat {
        &self.dernier
    }

    /// Dernier résultat réutilisable comme début d’expression (fini, non nul).
    fn reutilisable(&self) -> Option<String> {
        self.dernier
            .valeur()
            .filter(|v| *v != 0.0)
            .map(format_nombre)
    }

    fn reevaluer(&mut self) {
        self.dernier = evaluer(&self.expression, self.mode);
    }

    pub fn chiffre(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        self.historique = None;
        self.expression.push(c);
        self.reevaluer();
    }

    /// Jamais deux points dans un même opérande ; "0" ajouté devant si besoin.
    pub fn virgule(&mut self) {
        let operande = self
            .expression
            .rsplit(|c: char| GLYPHES_OP.contains(&c) || matches!(c, '-' | '(' | ')'))
            .next()
            .unwrap_or("");
        if operande.contains('.') {
            return;
        }
        self.historique = None;
        if operande.is_empty() {
            self.expression.push('0');
        }
        self.expression.push('.');
    }

    pub fn operateur(&mut self, op: OpSci) {
        if self.expression.is_empty() && op != OpSci::Moins {
            match self.reutilisable() {
                Some(t) => self.expression = t,
                None => return,
            }
        }
        self.historique = None;
        if self.expression.ends_with(GLYPHES_OP) {
            self.expression.pop();
        }
        self.expression.push(op.glyphe());
    }

    pub fn fonction(&mut self, f: ToucheFonction) {
        if f.postfixe() && self.expression.is_empty() {
            if let Some(t) = self.reutilisable() {
                self.expression = t;
            }
        }
        self.historique = None;
        self.expression.push_str(f.texte());
        self.reevaluer();
    }

    pub fn constante(&mut self, c: Constante) {
        self.historique = None;
        self.expression.push(match c {
            Constante::Pi => 'π',
            Constante::E => 'e',
        });
        self.reevaluer();
    }

    pub fn parenthese(&mut self, ouvrante: bool) {
        self.historique = None;
        self.expression.push(if ouvrante { '(' } else { ')' });
    }

    pub fn egal(&mut self) {
        if self.expression.is_empty() {
            return;
        }
        let expr = std::mem::take(&mut self.expression);
        self.dernier = evaluer(&expr, self.mode);
        debug!("scientifique: {expr:?} = {}", self.dernier);
        self.historique = Some(format!("{expr} ="));
    }

    pub fn effacer(&mut self) {
        self.expression.clear();
        self.dernier = Resultat::Valeur(0.0);
        self.historique = None;
    }

    /// Retour arrière : un nom de fonction avec sa '(' part d’un bloc.
    pub fn retour(&mut self) {
        if self.expression.is_empty() {
            return;
        }
        self.historique = None;
        match BLOCS_FONCTION
            .iter()
            .find(|bloc| self.expression.ends_with(**bloc))
        {
            Some(bloc) => {
                let n = self.expression.len() - bloc.len();
                self.expression.truncate(n);
            }
            None => {
                self.expression.pop();
            }
        }
        if self.expression.is_empty() {
            self.dernier = Resultat::Valeur(0.0);
        } else {
            self.reevaluer();
        }
    }

    /// Ajoute ou retire un '−' en tête de l’expression.
    pub fn oppose(&mut self) {
        if self.expression.is_empty() {
            if let Some(t) = self.reutilisable() {
                self.expression = t;
            }
        }
        self.historique = None;
        match self.expression.chars().next() {
            Some('−' | '-') => {
                self.expression.remove(0);
            }
            _ => self.expression.insert(0, '−'),
        }
        self.reevaluer();
    }

    pub fn touche(&mut self, c: char) -> bool {
        match c {
            '0'..='9' => self.chiffre(c),
            '.' => self.virgule(),
            '(' => self.parenthese(true),
            ')' => self.parenthese(false),
            '=' => self.egal(),
            'c' | 'C' => self.effacer(),
            _ => match OpSci::depuis_char(c) {
                Some(op) => self.operateur(op),
                None => return false,
            },
        }
        true
    }
}

/* ------------------------ Grapheur ------------------------ */

/// Saisie brute des quatre bornes (texte des champs).
#[derive(Clone, Debug, PartialEq)]
pub struct ChampsBornes {
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
}

impl ChampsBornes {
    pub fn depuis(f: &Fenetre) -> Self {
        Self {
            x_min: f.x_min().to_string(),
            x_max: f.x_max().to_string(),
            y_min: f.y_min().to_string(),
            y_max: f.y_max().to_string(),
        }
    }

    /// Champ non numérique => borne correspondante de `defaut`.
    fn lire(&self, defaut: &Fenetre) -> Bornes {
        fn champ(s: &str, d: f64) -> f64 {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(d)
        }
        Bornes {
            x_min: champ(&self.x_min, defaut.x_min()),
            x_max: champ(&self.x_max, defaut.x_max()),
            y_min: champ(&self.y_min, defaut.y_min()),
            y_max: champ(&self.y_max, defaut.y_max()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EtatGraphique {
    pub fonctions: ListeFonctions,
    fenetre: Fenetre,
    pub saisie: String,
    pub champs: ChampsBornes,
    /// dernier avertissement (expression illisible, fenêtre refusée)
    pub message: Option<String>,
}

impl EtatGraphique {
    pub fn new(fenetre: Fenetre, fonctions: ListeFonctions) -> Self {
        Self {
            fonctions,
            fenetre,
            saisie: String::new(),
            champs: ChampsBornes::depuis(&fenetre),
            message: None,
        }
    }

    pub fn fenetre(&self) -> &Fenetre {
        &self.fenetre
    }

    /// "Tracer" : la saisie passe dans la liste, le champ est vidé.
    pub fn tracer_saisie(&mut self) -> Ajout {
        let texte = std::mem::take(&mut self.saisie);
        let ajout = self.fonctions.ajouter(&texte);

        self.message = match ajout {
            Ajout::Ajoutee => compiler(&texte)
                .err()
                .map(|e| format!("« {texte} » ne sera pas tracée : {e}")),
            Ajout::Doublon => Some(format!("« {texte} » est déjà tracée")),
            Ajout::Vide => None,
        };
        debug!("grapheur: ajout {texte:?} -> {ajout:?}");
        ajout
    }

    pub fn retirer(&mut self, index: usize) {
        self.fonctions.retirer(index);
        self.message = None;
    }

    pub fn vider(&mut self) {
        self.fonctions.vider();
        self.saisie.clear();
        self.message = None;
    }

    /// Lit les quatre champs et remplace la fenêtre d’un bloc ;
    /// fenêtre inchangée si l’ordre min < max n’est pas respecté.
    pub fn appliquer_bornes(&mut self, defaut: &Fenetre) -> bool {
        let b = self.champs.lire(defaut);
        match self.fenetre.modifier(b) {
            Ok(()) => {
                self.message = None;
                true
            }
            Err(e) => {
                debug!("grapheur: bornes refusées {b:?}: {e}");
                self.message = Some(e.to_string());
                false
            }
        }
    }

    pub fn reinitialiser_fenetre(&mut self, defaut: Fenetre) {
        self.fenetre = defaut;
        self.champs = ChampsBornes::depuis(&defaut);
        self.message = None;
    }
}

/* ------------------------ Application ------------------------ */

/// Ce qui est conservé entre deux sessions (persistance eframe).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sauvegarde {
    pub onglet: Onglet,
    pub fenetre: Option<Fenetre>,
    pub fonctions: ListeFonctions,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub onglet: Onglet,
    pub standard: EtatStandard,
    pub scientifique: EtatScientifique,
    pub graphique: EtatGraphique,
    pub reglages: Reglages,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default(), None)
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages, sauvegarde: Option<Sauvegarde>) -> Self {
        let s = sauvegarde.unwrap_or_default();
        let onglet = if reglages.restaurer_onglet {
            s.onglet
        } else {
            Onglet::Standard
        };
        let fenetre = s.fenetre.unwrap_or(reglages.fenetre_defaut);

        Self {
            onglet,
            standard: EtatStandard::default(),
            scientifique: EtatScientifique::new(reglages.mode_angle),
            graphique: EtatGraphique::new(fenetre, s.fonctions),
            reglages,
        }
    }

    pub fn sauvegarde(&self) -> Sauvegarde {
        Sauvegarde {
            onglet: self.onglet,
            fenetre: Some(*self.graphique.fenetre()),
            fonctions: self.graphique.fonctions.clone(),
        }
    }

    /// Echap : remise à zéro de l’onglet actif.
    pub fn effacer_onglet(&mut self) {
        match self.onglet {
            Onglet::Standard => self.standard.effacer(),
            Onglet::Scientifique => self.scientifique.effacer(),
            Onglet::Graphique => self.graphique.saisie.clear(),
        }
    }
}
