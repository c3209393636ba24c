// src/app.rs
//
// Calculatrice graphique — module App (racine)
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Router le clavier physique vers l’onglet actif
// - Persistance : onglet, fenêtre, fonctions tracées (eframe::set_value)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;
use tracing::{debug, info};

use crate::config::Reglages;
use etat::{Onglet, Sauvegarde};

impl AppCalc {
    /// Démarrage : réglages + dernière session si le stockage en a une.
    pub fn depuis_contexte(cc: &eframe::CreationContext<'_>, reglages: Reglages) -> Self {
        let sauvegarde: Option<Sauvegarde> = cc
            .storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY));
        if sauvegarde.is_some() {
            info!("session précédente restaurée");
        }
        Self::new(reglages, sauvegarde)
    }

    /// Clavier physique : seulement hors champ de saisie, et pas pour le grapheur
    /// (qui n’a que des champs texte).
    fn clavier(&mut self, ctx: &egui::Context) {
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.effacer_onglet();
        }

        if self.onglet == Onglet::Graphique || ctx.wants_keyboard_input() {
            return;
        }

        let evenements = ctx.input(|i| i.events.clone());
        for ev in evenements {
            match ev {
                egui::Event::Text(t) => {
                    for c in t.chars() {
                        let pris = match self.onglet {
                            Onglet::Standard => self.standard.touche(c),
                            Onglet::Scientifique => self.scientifique.touche(c),
                            Onglet::Graphique => false,
                        };
                        if !pris {
                            debug!("touche ignorée {c:?}");
                        }
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match (key, self.onglet) {
                    (egui::Key::Enter, Onglet::Standard) => self.standard.egal(),
                    (egui::Key::Enter, Onglet::Scientifique) => self.scientifique.egal(),
                    (egui::Key::Backspace, Onglet::Standard) => self.standard.retour(),
                    (egui::Key::Backspace, Onglet::Scientifique) => self.scientifique.retour(),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let s = self.sauvegarde();
        debug!(
            onglet = ?s.onglet,
            fonctions = s.fonctions.len(),
            "sauvegarde de la session"
        );
        eframe::set_value(storage, eframe::APP_KEY, &s);
    }
}
