// src/noyau/expr.rs
//
// AST flottant (f64) + politique numérique.
// - Nombre : littéral ou constante déjà résolue (π, e)
// - X      : variable du grapheur
// - Fact   : factorielle postfixe (gamma.rs)
// - Appel  : fonction unaire, sensible au mode d’angle pour la trig
//
// Politique (jamais de panique) :
// - a/0 -> ±inf (0/0 -> NaN)
// - 0^0, sqrt(<0), log/ln(<=0), asin/acos hors [-1,1] -> NaN

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::gamma::factorial;

/// Mode d’angle pour sin/cos/tan (argument) et asin/acos/atan (résultat).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log, // base 10
    Ln,
    Sqrt,
    Abs,
    Exp,
    Factorielle,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "log" => Log,
            "ln" => Ln,
            "sqrt" => Sqrt,
            "abs" => Abs,
            "exp" => Exp,
            "factorial" => Factorielle,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Log => "log",
            Ln => "ln",
            Sqrt => "sqrt",
            Abs => "abs",
            Exp => "exp",
            Factorielle => "factorial",
        }
    }

    /// Applique la fonction. En degrés : conversion de l’argument (trig directe)
    /// ou du résultat (trig inverse).
    pub fn appliquer(self, v: f64, mode: ModeAngle) -> f64 {
        use Fonction::*;

        let vers_rad = |a: f64| match mode {
            ModeAngle::Radians => a,
            ModeAngle::Degres => a * (PI / 180.0),
        };
        let depuis_rad = |a: f64| match mode {
            ModeAngle::Radians => a,
            ModeAngle::Degres => a * (180.0 / PI),
        };

        match self {
            Sin => vers_rad(v).sin(),
            Cos => vers_rad(v).cos(),
            Tan => vers_rad(v).tan(),

            Asin => depuis_rad(v.asin()),
            Acos => depuis_rad(v.acos()),
            Atan => depuis_rad(v.atan()),

            Log if v <= 0.0 => f64::NAN,
            Log => v.log10(),
            Ln if v <= 0.0 => f64::NAN,
            Ln => v.ln(),

            Sqrt => v.sqrt(),
            Abs => v.abs(),
            Exp => v.exp(),
            Factorielle => factorial(v),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    X,

    Neg(Box<Expr>),
    Fact(Box<Expr>),
    Appel(Fonction, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue l’arbre pour une valeur de x.
    /// La profondeur est bornée au parsing (rpn.rs), la récursion ici est donc sûre.
    pub fn eval(&self, x: f64, mode: ModeAngle) -> f64 {
        use Expr::*;

        match self {
            Nombre(n) => *n,
            X => x,

            Neg(a) => -a.eval(x, mode),
            Fact(a) => factorial(a.eval(x, mode)),
            Appel(f, a) => f.appliquer(a.eval(x, mode), mode),

            Add(a, b) => a.eval(x, mode) + b.eval(x, mode),
            Sub(a, b) => a.eval(x, mode) - b.eval(x, mode),
            Mul(a, b) => a.eval(x, mode) * b.eval(x, mode),
            Div(a, b) => a.eval(x, mode) / b.eval(x, mode),
            Pow(a, b) => puissance(a.eval(x, mode), b.eval(x, mode)),
        }
    }

    /// Vrai si l’expression dépend de x.
    /// Itératif : pas de récursion sur des arbres profonds.
    pub fn contient_x(&self) -> bool {
        use Expr::*;

        let mut pile: Vec<&Expr> = vec![self];
        while let Some(e) = pile.pop() {
            match e {
                X => return true,
                Nombre(_) => {}
                Neg(a) | Fact(a) | Appel(_, a) => pile.push(a.as_ref()),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }
        false
    }
}

/// a^b, avec 0^0 indéfini.
fn puissance(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return f64::NAN;
    }
    a.powf(b)
}

impl fmt::Display for Expr {
    /// Forme entièrement parenthésée (traces / tests).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(n) => write!(f, "{n}"),
            X => write!(f, "x"),
            Neg(a) => write!(f, "(-{a})"),
            Fact(a) => write!(f, "({a})!"),
            Appel(func, a) => write!(f, "{}({a})", func.nom()),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Box<Expr> {
        Box::new(Expr::Nombre(v))
    }

    #[test]
    fn zero_puissance_zero_indefini() {
        assert!(Expr::Pow(n(0.0), n(0.0))
            .eval(0.0, ModeAngle::Radians)
            .is_nan());
        assert_eq!(Expr::Pow(n(0.0), n(2.0)).eval(0.0, ModeAngle::Radians), 0.0);
    }

    #[test]
    fn division_par_zero() {
        let r = Expr::Div(n(1.0), n(0.0)).eval(0.0, ModeAngle::Radians);
        assert!(r.is_infinite() && r > 0.0);
        assert!(Expr::Div(n(0.0), n(0.0))
            .eval(0.0, ModeAngle::Radians)
            .is_nan());
    }

    #[test]
    fn domaines_hors_limites() {
        let m = ModeAngle::Radians;
        assert!(Fonction::Sqrt.appliquer(-1.0, m).is_nan());
        assert!(Fonction::Ln.appliquer(0.0, m).is_nan());
        assert!(Fonction::Log.appliquer(-5.0, m).is_nan());
        assert!(Fonction::Asin.appliquer(1.5, m).is_nan());
        assert!(Fonction::Acos.appliquer(-1.01, m).is_nan());
    }

    #[test]
    fn trig_en_degres() {
        let d = ModeAngle::Degres;
        assert!((Fonction::Sin.appliquer(30.0, d) - 0.5).abs() < 1e-12);
        assert!((Fonction::Cos.appliquer(60.0, d) - 0.5).abs() < 1e-12);
        assert!((Fonction::Asin.appliquer(1.0, d) - 90.0).abs() < 1e-12);
        assert!((Fonction::Atan.appliquer(1.0, d) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn trig_en_radians() {
        let r = ModeAngle::Radians;
        assert!((Fonction::Sin.appliquer(PI / 2.0, r) - 1.0).abs() < 1e-12);
        assert!((Fonction::Acos.appliquer(-1.0, r) - PI).abs() < 1e-12);
    }

    #[test]
    fn variable_x() {
        let e = Expr::Mul(n(2.0), Box::new(Expr::X));
        assert_eq!(e.eval(3.0, ModeAngle::Radians), 6.0);
        assert!(e.contient_x());
        assert!(!Expr::Nombre(1.0).contient_x());
    }

    #[test]
    fn noms_aller_retour() {
        for nom in ["sin", "acos", "log", "ln", "abs", "exp", "factorial"] {
            let f = Fonction::depuis_nom(nom).unwrap();
            assert_eq!(f.nom(), nom);
        }
        assert!(Fonction::depuis_nom("sinh").is_none());
    }
}
