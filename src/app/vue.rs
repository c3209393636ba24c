// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Trois onglets sur le même AppCalc (etat.rs) : standard, scientifique, grapheur
// - Pavés tactiles : gros boutons, une Touche par bouton
// - Grapheur : fond + grille + axes + étiquettes + courbes, dessinés au Painter
//
// Note :
// - Le clavier physique est routé dans app.rs (hors champs de saisie).

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Stroke};

use super::etat::{AppCalc, Constante, OpSci, OpStd, Onglet, ToucheFonction};
use crate::noyau::fonctions::Couleur;
use crate::noyau::format::TEXTE_ERREUR;
use crate::noyau::grille::planifier;
use crate::noyau::trace::tracer_texte;
use crate::noyau::ModeAngle;

/* ------------------------ Couleurs du grapheur ------------------------ */

const FOND: Color32 = Color32::from_rgb(0x0a, 0x16, 0x28);
const GRILLE: Color32 = Color32::from_rgb(0x1a, 0x27, 0x44);
const AXES: Color32 = Color32::from_rgb(0x3d, 0x5a, 0x80);
const ETIQUETTES: Color32 = Color32::from_rgb(0x6b, 0x7a, 0x8f);

fn couleur(c: Couleur) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Surface du tracé en pixels entiers : grille et courbes partagent la même.
fn surface(taille: egui::Vec2) -> (u32, u32) {
    (taille.x.max(0.0) as u32, taille.y.max(0.0) as u32)
}

/// Touches des pavés (un bouton = une touche).
#[derive(Clone, Copy, Debug)]
enum Touche {
    Chiffre(char),
    Virgule,
    Egal,
    Effacer,
    Retour,
    Oppose,
    Pourcent,
    OpStd(OpStd),
    OpSci(OpSci),
    Fonction(ToucheFonction),
    Constante(Constante),
    Parenthese(bool),
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.horizontal(|ui| {
            for o in Onglet::TOUS {
                ui.selectable_value(&mut self.onglet, o, o.titre());
            }
        });
        ui.separator();

        match self.onglet {
            Onglet::Standard => self.ui_standard(ui),
            Onglet::Scientifique => self.ui_scientifique(ui),
            Onglet::Graphique => self.ui_graphique(ui),
        }
    }

    /* ------------------------ Standard ------------------------ */

    fn ui_standard(&mut self, ui: &mut egui::Ui) {
        let expr = self.standard.expression().to_string();
        let res = self.standard.affichage();
        Self::ecran(ui, "ecran_standard", &expr, &res, res == TEXTE_ERREUR);

        ui.add_space(8.0);

        let lignes: &[&[(&str, Touche)]] = &[
            &[
                ("C", Touche::Effacer),
                ("±", Touche::Oppose),
                ("%", Touche::Pourcent),
                ("÷", Touche::OpStd(OpStd::Divise)),
            ],
            &[
                ("7", Touche::Chiffre('7')),
                ("8", Touche::Chiffre('8')),
                ("9", Touche::Chiffre('9')),
                ("×", Touche::OpStd(OpStd::Fois)),
            ],
            &[
                ("4", Touche::Chiffre('4')),
                ("5", Touche::Chiffre('5')),
                ("6", Touche::Chiffre('6')),
                ("−", Touche::OpStd(OpStd::Moins)),
            ],
            &[
                ("1", Touche::Chiffre('1')),
                ("2", Touche::Chiffre('2')),
                ("3", Touche::Chiffre('3')),
                ("+", Touche::OpStd(OpStd::Plus)),
            ],
            &[
                ("0", Touche::Chiffre('0')),
                (".", Touche::Virgule),
                ("⌫", Touche::Retour),
                ("=", Touche::Egal),
            ],
        ];
        self.pave(ui, "pave_standard", lignes, 4, [72.0, 44.0]);
    }

    /* ------------------------ Scientifique ------------------------ */

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        let expr = self.scientifique.ligne().to_string();
        let res = self.scientifique.affichage();
        let erreur = self.scientifique.dernier().est_erreur();
        Self::ecran(ui, "ecran_scientifique", &expr, &res, erreur);

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let mut mode = self.scientifique.mode();
            ui.selectable_value(&mut mode, ModeAngle::Degres, "DEG");
            ui.selectable_value(&mut mode, ModeAngle::Radians, "RAD");
            if mode != self.scientifique.mode() {
                self.scientifique.set_mode(mode);
            }
        });

        ui.add_space(4.0);

        use ToucheFonction as F;
        let lignes: &[&[(&str, Touche)]] = &[
            &[
                ("sin", Touche::Fonction(F::Sin)),
                ("cos", Touche::Fonction(F::Cos)),
                ("tan", Touche::Fonction(F::Tan)),
                ("log", Touche::Fonction(F::Log)),
                ("ln", Touche::Fonction(F::Ln)),
            ],
            &[
                ("asin", Touche::Fonction(F::Asin)),
                ("acos", Touche::Fonction(F::Acos)),
                ("atan", Touche::Fonction(F::Atan)),
                ("√", Touche::Fonction(F::Sqrt)),
                ("x²", Touche::Fonction(F::Carre)),
            ],
            &[
                ("n!", Touche::Fonction(F::Factorielle)),
                ("π", Touche::Constante(Constante::Pi)),
                ("e", Touche::Constante(Constante::E)),
                ("(", Touche::Parenthese(true)),
                (")", Touche::Parenthese(false)),
            ],
            &[
                ("C", Touche::Effacer),
                ("⌫", Touche::Retour),
                ("±", Touche::Oppose),
                ("^", Touche::OpSci(OpSci::Puissance)),
                ("÷", Touche::OpSci(OpSci::Divise)),
            ],
            &[
                ("7", Touche::Chiffre('7')),
                ("8", Touche::Chiffre('8')),
                ("9", Touche::Chiffre('9')),
                ("×", Touche::OpSci(OpSci::Fois)),
            ],
            &[
                ("4", Touche::Chiffre('4')),
                ("5", Touche::Chiffre('5')),
                ("6", Touche::Chiffre('6')),
                ("−", Touche::OpSci(OpSci::Moins)),
            ],
            &[
                ("1", Touche::Chiffre('1')),
                ("2", Touche::Chiffre('2')),
                ("3", Touche::Chiffre('3')),
                ("+", Touche::OpSci(OpSci::Plus)),
            ],
            &[
                ("0", Touche::Chiffre('0')),
                (".", Touche::Virgule),
                ("=", Touche::Egal),
            ],
        ];
        self.pave(ui, "pave_scientifique", lignes, 5, [58.0, 38.0]);
    }

    /* ------------------------ Grapheur ------------------------ */

    fn ui_graphique(&mut self, ui: &mut egui::Ui) {
        // Saisie f(x) + actions
        ui.horizontal(|ui| {
            ui.label("f(x) =");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.graphique.saisie)
                    .desired_width(220.0)
                    .hint_text("Ex: sin(x), x^2-4, 1/x")
                    .id_salt("saisie_fonction")
                    .code_editor(),
            );
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.lost_focus() && enter {
                self.graphique.tracer_saisie();
                resp.request_focus();
            }

            if ui.button("Tracer").clicked() {
                self.graphique.tracer_saisie();
            }
            if ui.button("Effacer tout").clicked() {
                self.graphique.vider();
            }
        });

        // Bornes
        let defaut = self.reglages.fenetre_defaut;
        ui.horizontal_wrapped(|ui| {
            let mut changer = false;
            let champs = &mut self.graphique.champs;
            for (titre, valeur) in [
                ("x min", &mut champs.x_min),
                ("x max", &mut champs.x_max),
                ("y min", &mut champs.y_min),
                ("y max", &mut champs.y_max),
            ] {
                ui.label(titre);
                let resp = ui.add(egui::TextEdit::singleline(valeur).desired_width(56.0));
                changer |= resp.lost_focus();
            }
            if changer {
                self.graphique.appliquer_bornes(&defaut);
            }
            if ui.button("Réinitialiser").clicked() {
                self.graphique.reinitialiser_fenetre(defaut);
            }
        });

        if let Some(msg) = &self.graphique.message {
            ui.colored_label(ui.visuals().warn_fg_color, msg);
        }

        // Liste des fonctions
        let mut a_retirer = None;
        ui.horizontal_wrapped(|ui| {
            if self.graphique.fonctions.is_empty() {
                ui.weak("Aucune fonction tracée");
            }
            for (i, f) in self.graphique.fonctions.iter().enumerate() {
                ui.colored_label(couleur(f.couleur()), "■");
                ui.monospace(f.texte());
                if ui.small_button("✕").on_hover_text("Retirer").clicked() {
                    a_retirer = Some(i);
                }
                ui.add_space(8.0);
            }
        });
        if let Some(i) = a_retirer {
            self.graphique.retirer(i);
        }

        ui.add_space(4.0);
        self.ui_trace(ui);
    }

    fn ui_trace(&mut self, ui: &mut egui::Ui) {
        let taille = ui.available_size().max(egui::vec2(200.0, 200.0));
        let (resp, painter) = ui.allocate_painter(taille, egui::Sense::hover());
        let rect = resp.rect;
        let (l, h) = surface(rect.size());
        let fenetre = self.graphique.fenetre();

        painter.rect_filled(rect, 0.0, FOND);

        // Grille
        let plan = planifier(fenetre, f64::from(l), f64::from(h));
        let trait_grille = Stroke::new(1.0, GRILLE);
        for g in &plan.verticales {
            let x = rect.left() + g.position as f32;
            let haut_bas = [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())];
            painter.line_segment(haut_bas, trait_grille);
        }
        for g in &plan.horizontales {
            let y = rect.top() + g.position as f32;
            let gauche_droite = [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)];
            painter.line_segment(gauche_droite, trait_grille);
        }

        // Axes
        let trait_axe = Stroke::new(2.0, AXES);
        if let Some(y) = plan.axe_x {
            let y = rect.top() + y as f32;
            let gauche_droite = [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)];
            painter.line_segment(gauche_droite, trait_axe);
        }
        if let Some(x) = plan.axe_y {
            let x = rect.left() + x as f32;
            let haut_bas = [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())];
            painter.line_segment(haut_bas, trait_axe);
        }

        // Étiquettes
        let police = FontId::proportional(12.0);
        let ligne_x = rect.top() + plan.ligne_etiquettes_x as f32;
        // axe x hors champ : étiquettes posées au-dessus du bord bas
        let ancre_x = if plan.axe_x.is_some() {
            Align2::CENTER_TOP
        } else {
            Align2::CENTER_BOTTOM
        };
        for g in &plan.verticales {
            if let Some(txt) = &g.etiquette {
                let pos = Pos2::new(rect.left() + g.position as f32, ligne_x);
                painter.text(pos, ancre_x, txt, police.clone(), ETIQUETTES);
            }
        }
        let colonne_y = rect.left() + plan.colonne_etiquettes_y as f32;
        for g in &plan.horizontales {
            if let Some(txt) = &g.etiquette {
                let pos = Pos2::new(colonne_y, rect.top() + g.position as f32);
                painter.text(pos, Align2::LEFT_CENTER, txt, police.clone(), ETIQUETTES);
            }
        }
        if let Some((ox, oy)) = plan.origine {
            let pos = Pos2::new(rect.left() + ox as f32, rect.top() + oy as f32);
            painter.text(pos, Align2::LEFT_TOP, "0", police, ETIQUETTES);
        }

        // Courbes (radians)
        let clip = painter.with_clip_rect(rect);
        let epaisseur = self.reglages.epaisseur_trait;
        for f in self.graphique.fonctions.iter() {
            let Ok(segments) = tracer_texte(f.texte(), fenetre, l, h) else {
                continue;
            };
            let trait_courbe = Stroke::new(epaisseur, couleur(f.couleur()));
            for seg in segments {
                let points: Vec<Pos2> = seg
                    .iter()
                    .map(|p| {
                        // hors écran : on borne pour garder des coordonnées raisonnables
                        let y = p.y.clamp(-2.0 * f64::from(h), 3.0 * f64::from(h));
                        Pos2::new(rect.left() + p.x as f32, rect.top() + y as f32)
                    })
                    .collect();
                if points.len() == 1 {
                    clip.circle_filled(points[0], epaisseur / 2.0, trait_courbe.color);
                } else {
                    clip.add(egui::Shape::line(points, trait_courbe));
                }
            }
        }
    }

    /* ------------------------ Briques communes ------------------------ */

    fn ecran(ui: &mut egui::Ui, id: &str, expression: &str, resultat: &str, erreur: bool) {
        let couleur_res = if erreur {
            ui.visuals().error_fg_color
        } else {
            ui.visuals().strong_text_color()
        };
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                        ui.label(egui::RichText::new(expression).weak().monospace());
                        ui.label(
                            egui::RichText::new(resultat)
                                .monospace()
                                .size(28.0)
                                .color(couleur_res),
                        );
                    });
                });
            });
    }

    fn pave(
        &mut self,
        ui: &mut egui::Ui,
        id: &str,
        lignes: &[&[(&str, Touche)]],
        colonnes: usize,
        taille: [f32; 2],
    ) {
        egui::Grid::new(id)
            .num_columns(colonnes)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in lignes {
                    for &(label, touche) in ligne.iter() {
                        if ui.add_sized(taille, egui::Button::new(label)).clicked() {
                            self.appuyer(touche);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn appuyer(&mut self, touche: Touche) {
        match self.onglet {
            Onglet::Standard => {
                let s = &mut self.standard;
                match touche {
                    Touche::Chiffre(c) => s.chiffre(c),
                    Touche::Virgule => s.virgule(),
                    Touche::Egal => s.egal(),
                    Touche::Effacer => s.effacer(),
                    Touche::Retour => s.retour(),
                    Touche::Oppose => s.oppose(),
                    Touche::Pourcent => s.pourcent(),
                    Touche::OpStd(op) => s.operateur(op),
                    _ => {}
                }
            }
            Onglet::Scientifique => {
                let s = &mut self.scientifique;
                match touche {
                    Touche::Chiffre(c) => s.chiffre(c),
                    Touche::Virgule => s.virgule(),
                    Touche::Egal => s.egal(),
                    Touche::Effacer => s.effacer(),
                    Touche::Retour => s.retour(),
                    Touche::Oppose => s.oppose(),
                    Touche::OpSci(op) => s.operateur(op),
                    Touche::Fonction(f) => s.fonction(f),
                    Touche::Constante(c) => s.constante(c),
                    Touche::Parenthese(o) => s.parenthese(o),
                    _ => {}
                }
            }
            Onglet::Graphique => {}
        }
    }
}
