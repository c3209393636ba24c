// src/noyau/jetons.rs
//
// Texte saisi -> jetons normalisés.
// - glyphes d’affichage (× ÷ − π) -> opérateurs / constantes canoniques
// - √ préfixe : "√4", "2√x", "√(x+1)"
// - noms de fonctions reconnus par plus long préfixe (asin avant sin, exp avant e)
// - multiplication implicite insérée APRÈS la lecture (2x, x2, 2(…), )(, )x, …)

use super::erreur::ErreurCalcul;
use super::expr::Fonction;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    E,

    // seule variable du grapheur
    X,
    Fonction(Fonction),
    Racine, // √ (préfixe, parenthèses facultatives)

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (postfixe)

    LPar,
    RPar,
}

/// Mots reconnus, du plus long au plus court (le premier préfixe qui colle gagne).
const MOTS: &[&str] = &[
    "factorial",
    "asin",
    "acos",
    "atan",
    "sqrt",
    "sin",
    "cos",
    "tan",
    "log",
    "abs",
    "exp",
    "ln",
    "pi",
    "x",
    "e",
];

/// Tokenize + multiplication implicite.
///
/// Supporte:
/// - nombres décimaux (12, 0.5, .5) avec exposant optionnel (1.5e+12)
/// - opérateurs + - * / ^ ! et leurs glyphes × ÷ − – —
/// - parenthèses ( )
/// - π / pi, e (sauf si suivi de x ou p)
/// - √ préfixe (sqrt de l’opérande qui suit)
/// - fonctions sin cos tan asin acos atan log ln sqrt abs exp factorial
/// - variable x
///
/// Majuscules acceptées (SIN, PI, X).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' | '–' | '—' => Some(Tok::Minus),
            '*' | '×' | '·' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Racine),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (n, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = fin;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let (t, fin) = lire_mot(&chars, i)?;
            out.push(t);
            i = fin;
            continue;
        }

        return Err(ErreurCalcul::CaractereInattendu(c));
    }

    Ok(inserer_multiplications(out))
}

/// Lit un littéral numérique à partir de `debut`.
/// Renvoie (valeur, index après le littéral).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(f64, usize), ErreurCalcul> {
    let mut i = debut;
    let mut points = 0usize;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            points += 1;
        }
        i += 1;
    }

    // exposant : e/E, signe optionnel, AU MOINS un chiffre (sinon c’est la constante e)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-' | '−') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let brut: String = chars[debut..i]
        .iter()
        .map(|&c| if c == '−' { '-' } else { c })
        .collect();

    if points > 1 || brut.starts_with(".e") || brut == "." {
        return Err(ErreurCalcul::NombreInvalide(brut));
    }

    let n = brut
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::NombreInvalide(brut.clone()))?;
    Ok((n, i))
}

/// Lit un mot (fonction / constante / variable) par plus long préfixe connu.
fn lire_mot(chars: &[char], debut: usize) -> Result<(Tok, usize), ErreurCalcul> {
    let reste: String = chars[debut..]
        .iter()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_lowercase();

    for mot in MOTS {
        if !reste.starts_with(mot) {
            continue;
        }

        let fin = debut + mot.chars().count();

        // e : seulement si pas immédiatement suivi de x / p (collision avec exp)
        if *mot == "e" && matches!(reste[1..].chars().next(), Some('x' | 'p')) {
            continue;
        }

        let tok = match *mot {
            "pi" => Tok::Pi,
            "e" => Tok::E,
            "x" => Tok::X,
            nom => match Fonction::depuis_nom(nom) {
                Some(f) => Tok::Fonction(f),
                None => continue,
            },
        };
        return Ok((tok, fin));
    }

    Err(ErreurCalcul::IdentInconnu(reste))
}

fn fin_de_valeur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Pi | Tok::E | Tok::X | Tok::RPar | Tok::Bang
    )
}

fn debut_de_valeur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Pi | Tok::E | Tok::X | Tok::LPar | Tok::Fonction(_) | Tok::Racine
    )
}

/// Multiplication implicite : "2x", "x2", "2(…)", "x(…)", ")(", ")2", ")x", "2π", "3sin(x)",
/// "2√x".
///
/// Deux nombres collés ("2 3") restent tels quels : le parseur les refusera.
pub fn inserer_multiplications(tokens: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() * 2);

    for tok in tokens {
        if let Some(prev) = out.last() {
            let deux_nombres = matches!((prev, &tok), (Tok::Num(_), Tok::Num(_)));
            if fin_de_valeur(prev) && debut_de_valeur(&tok) && !deux_nombres {
                out.push(Tok::Star);
            }
        }
        out.push(tok);
    }

    out
}

/// Format utilitaire (debug/traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::X => "x".to_string(),
            Tok::Fonction(f) => f.nom().to_string(),
            Tok::Racine => "√".to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
