// src/noyau/trace.rs
//
// Tracé d’une fonction : un échantillon par colonne de pixel (0..=largeur),
// évaluation en radians, conversion en repère écran, découpe en segments.
//
// Un segment est coupé quand :
// - l’échantillon n’est pas fini (NaN, ±inf), ou
// - le saut vertical entre deux échantillons finis dépasse la hauteur de la surface
//   (asymptotes type tan(x), 1/x) : jamais de trait à travers une discontinuité.

use tracing::trace;

use super::erreur::ErreurCalcul;
use super::eval::compiler;
use super::expr::{Expr, ModeAngle};
use super::fenetre::Fenetre;

/// Point en coordonnées écran (pixels, origine en haut à gauche).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Polyligne continue.
pub type Segment = Vec<Point>;

/// Échantillonne `expr` sur la fenêtre et renvoie les segments continus.
pub fn tracer(expr: &Expr, fenetre: &Fenetre, largeur: u32, hauteur: u32) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    if largeur == 0 || hauteur == 0 {
        return segments;
    }

    let l = f64::from(largeur);
    let h = f64::from(hauteur);

    let mut courant: Segment = Vec::new();

    for px in 0..=largeur {
        let px = f64::from(px);
        let x = fenetre.depuis_ecran_x(px, l);
        let y = expr.eval(x, ModeAngle::Radians);

        if !y.is_finite() {
            if !courant.is_empty() {
                segments.push(std::mem::take(&mut courant));
            }
            continue;
        }

        let y_ecran = fenetre.vers_ecran_y(y, h);

        if let Some(prec) = courant.last() {
            if (y_ecran - prec.y).abs() > h {
                segments.push(std::mem::take(&mut courant));
            }
        }
        courant.push(Point { x: px, y: y_ecran });
    }

    if !courant.is_empty() {
        segments.push(courant);
    }

    trace!(
        segments = segments.len(),
        points = segments.iter().map(Vec::len).sum::<usize>(),
        "tracé {expr} sur {largeur}x{hauteur}"
    );
    segments
}

/// Compile puis trace. Expression malformée : erreur, rien à dessiner.
pub fn tracer_texte(
    texte: &str,
    fenetre: &Fenetre,
    largeur: u32,
    hauteur: u32,
) -> Result<Vec<Segment>, ErreurCalcul> {
    let expr = compiler(texte)?;
    Ok(tracer(&expr, fenetre, largeur, hauteur))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(s: &str, f: &Fenetre, l: u32, h: u32) -> Vec<Segment> {
        tracer_texte(s, f, l, h).unwrap_or_else(|e| panic!("tracer({s:?}): {e}"))
    }

    #[test]
    fn droite_un_seul_segment() {
        let f = Fenetre::default();
        let s = segs("x", &f, 200, 200);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].len(), 201);
        assert_eq!(s[0][0], Point { x: 0.0, y: 200.0 });
        assert_eq!(s[0][200], Point { x: 200.0, y: 0.0 });
    }

    #[test]
    fn inverse_coupe_en_zero() {
        let f = Fenetre::default();
        for largeur in [400, 401, 333] {
            let s = segs("1/x", &f, largeur, 300);
            assert!(s.len() >= 2, "largeur={largeur}: {} segments", s.len());

            // aucun segment ne traverse x = 0 (colonne écran du zéro)
            let zero = f.vers_ecran_x(0.0, f64::from(largeur));
            for seg in &s {
                let gauche = seg.iter().all(|p| p.x < zero);
                let droite = seg.iter().all(|p| p.x > zero);
                assert!(gauche || droite, "segment à cheval sur x=0");
            }
        }
    }

    #[test]
    fn tangente_coupee_aux_asymptotes() {
        let f = Fenetre::default();
        let s = segs("tan(x)", &f, 800, 400);
        // asymptotes à ±π/2, ±3π/2, ±5π/2 dans [-10, 10] : 6 coupures
        assert!(s.len() >= 7, "{} segments", s.len());
        for seg in &s {
            for w in seg.windows(2) {
                assert!((w[1].y - w[0].y).abs() <= 400.0);
            }
        }
    }

    #[test]
    fn racine_non_definie_a_gauche() {
        let f = Fenetre::default();
        let s = segs("sqrt(x)", &f, 100, 100);
        assert_eq!(s.len(), 1);
        // x >= 0 seulement : colonnes 50..=100
        assert_eq!(s[0].first().map(|p| p.x), Some(50.0));
        assert_eq!(s[0].len(), 51);
    }

    #[test]
    fn fonction_nulle_partout() {
        let f = Fenetre::default();
        assert!(segs("ln(-abs(x)-1)", &f, 100, 100).is_empty());
    }

    #[test]
    fn surface_vide() {
        let f = Fenetre::default();
        assert!(segs("x", &f, 0, 100).is_empty());
        assert!(segs("x", &f, 100, 0).is_empty());
    }

    #[test]
    fn malforme() {
        let f = Fenetre::default();
        assert!(tracer_texte("2+", &f, 100, 100).is_err());
    }

    #[test]
    fn constante_horizontale() {
        let f = Fenetre::new(0.0, 1.0, 0.0, 4.0).unwrap();
        let s = segs("3", &f, 10, 100);
        assert_eq!(s.len(), 1);
        assert!(s[0].iter().all(|p| p.y == 25.0));
    }
}
