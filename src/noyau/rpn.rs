// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la grammaire au passage
// - Puis reconstruire Expr (profondeur bornée)
//
// Précédences (de la plus forte à la plus faible) :
//   appel de fonction, ! (postfixe)  >  - unaire, √  >  ^ (droite)  >  * /  >  + -
//
// NOTE:
// - "!" s’applique à la valeur qui le précède : sortie directe en RPN.
// - Le moins unaire et √ sont des opérateurs préfixes : empilés sans rien dépiler.
// - Une fonction exige '(' juste après son nom, et sort après la ')' associée.

use super::erreur::ErreurCalcul;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

/// Profondeur maximale de l’arbre (évaluation récursive sans risque de pile).
pub const PROFONDEUR_MAX: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Neg,
    Racine,
    Fact,
    Appel(Fonction),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElemRpn {
    Num(f64),
    X,
    Op(Op),
}

/// Contenu de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Op(Op),
    LPar,
}

fn precedence(op: Op) -> i32 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
        Op::Pow => 3,
        Op::Neg | Op::Racine => 4,
        Op::Fact | Op::Appel(_) => 5,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Pow)
}

fn op_binaire(t: &Tok) -> Option<Op> {
    match t {
        Tok::Plus => Some(Op::Add),
        Tok::Minus => Some(Op::Sub),
        Tok::Star => Some(Op::Mul),
        Tok::Slash => Some(Op::Div),
        Tok::Caret => Some(Op::Pow),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, Pi, Slash, Num(2), RPar, Bang]
///   rpn:    [Num(π), Num(2), Op(Div), Op(Appel(Sin)), Op(Fact)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<ElemRpn>, ErreurCalcul> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::EntreeVide);
    }

    let mut out: Vec<ElemRpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // true tant qu’on attend un opérande (début, après '(' ou un opérateur)
    let mut attend_valeur = true;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E | Tok::X => {
                if !attend_valeur {
                    // "2 3" : deux opérandes sans opérateur
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                out.push(match tok {
                    Tok::Num(n) => ElemRpn::Num(*n),
                    Tok::Pi => ElemRpn::Num(std::f64::consts::PI),
                    Tok::E => ElemRpn::Num(std::f64::consts::E),
                    _ => ElemRpn::X,
                });
                attend_valeur = false;
            }

            Tok::Fonction(f) => {
                if !attend_valeur {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                if tokens.get(i + 1) != Some(&Tok::LPar) {
                    return Err(ErreurCalcul::FonctionSansParenthese(f.nom().into()));
                }
                ops.push(Pile::Op(Op::Appel(*f)));
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                ops.push(Pile::LPar);
            }

            Tok::RPar => {
                if attend_valeur {
                    // "()" ou "(2+)"
                    return Err(ErreurCalcul::OperandeManquant);
                }

                // dépile jusqu’à '('
                let mut fermee = false;
                while let Some(top) = ops.pop() {
                    match top {
                        Pile::LPar => {
                            fermee = true;
                            break;
                        }
                        Pile::Op(op) => out.push(ElemRpn::Op(op)),
                    }
                }
                if !fermee {
                    return Err(ErreurCalcul::ParentheseInattendue);
                }

                // si une fonction est au sommet, elle sort avec son argument
                if let Some(Pile::Op(Op::Appel(f))) = ops.last().copied() {
                    ops.pop();
                    out.push(ElemRpn::Op(Op::Appel(f)));
                }
            }

            Tok::Bang => {
                if attend_valeur {
                    return Err(ErreurCalcul::OperandeManquant);
                }
                out.push(ElemRpn::Op(Op::Fact));
            }

            Tok::Racine => {
                if !attend_valeur {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                ops.push(Pile::Op(Op::Racine));
            }

            // moins / plus unaires
            Tok::Minus if attend_valeur => ops.push(Pile::Op(Op::Neg)),
            Tok::Plus if attend_valeur => {}

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if attend_valeur {
                    return Err(ErreurCalcul::OperandeManquant);
                }
                let op = op_binaire(tok).ok_or(ErreurCalcul::ExpressionInvalide)?;

                // dépile tant que:
                // - on n'est pas bloqué par '(' ni par une fonction en attente
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(Pile::Op(top)) = ops.last().copied() {
                    if matches!(top, Op::Appel(_)) {
                        break;
                    }
                    let doit_pop = if is_right_associative(op) {
                        precedence(top) > precedence(op)
                    } else {
                        precedence(top) >= precedence(op)
                    };
                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(ElemRpn::Op(top));
                }

                ops.push(Pile::Op(op));
                attend_valeur = true;
            }
        }
    }

    if attend_valeur {
        return Err(ErreurCalcul::OperandeManquant);
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            Pile::LPar => return Err(ErreurCalcul::ParentheseNonFermee),
            Pile::Op(op) => out.push(ElemRpn::Op(op)),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN, en bornant la profondeur.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ErreurCalcul> {
    // (expression, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for elem in rpn {
        let noeud = match *elem {
            ElemRpn::Num(n) => (Expr::Nombre(n), 1),
            ElemRpn::X => (Expr::X, 1),

            ElemRpn::Op(op @ (Op::Neg | Op::Racine | Op::Fact | Op::Appel(_))) => {
                let (a, pa) = st.pop().ok_or(ErreurCalcul::OperandeManquant)?;
                let a = Box::new(a);
                let e = match op {
                    Op::Neg => Expr::Neg(a),
                    Op::Racine => Expr::Appel(Fonction::Sqrt, a),
                    Op::Fact => Expr::Fact(a),
                    Op::Appel(f) => Expr::Appel(f, a),
                    _ => return Err(ErreurCalcul::ExpressionInvalide),
                };
                (e, pa + 1)
            }

            ElemRpn::Op(op) => {
                let (b, pb) = st.pop().ok_or(ErreurCalcul::OperandeManquant)?;
                let (a, pa) = st.pop().ok_or(ErreurCalcul::OperandeManquant)?;
                let (a, b) = (Box::new(a), Box::new(b));
                let e = match op {
                    Op::Add => Expr::Add(a, b),
                    Op::Sub => Expr::Sub(a, b),
                    Op::Mul => Expr::Mul(a, b),
                    Op::Div => Expr::Div(a, b),
                    Op::Pow => Expr::Pow(a, b),
                    _ => return Err(ErreurCalcul::ExpressionInvalide),
                };
                (e, pa.max(pb) + 1)
            }
        };

        if noeud.1 > PROFONDEUR_MAX {
            return Err(ErreurCalcul::TropProfond(PROFONDEUR_MAX));
        }
        st.push(noeud);
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurCalcul::ExpressionInvalide),
    }
}

/// Format utilitaire (traces) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| match e {
            ElemRpn::Num(n) => format!("{n}"),
            ElemRpn::X => "x".to_string(),
            ElemRpn::Op(op) => match op {
                Op::Add => "+".to_string(),
                Op::Sub => "-".to_string(),
                Op::Mul => "*".to_string(),
                Op::Div => "/".to_string(),
                Op::Pow => "^".to_string(),
                Op::Neg => "neg".to_string(),
                Op::Racine => "√".to_string(),
                Op::Fact => "!".to_string(),
                Op::Appel(f) => f.nom().to_string(),
            },
        })
        .collect::<Vec<_>>()
        .join(" ")
}
