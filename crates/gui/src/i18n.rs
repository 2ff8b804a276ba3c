use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Fr (default)

pub fn lang() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::En,
        _ => Language::Fr,
    }
}

pub fn set_lang(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::Fr => 0,
            Language::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let fr = lang() == Language::Fr;
    match key {
        // ── Menus ───────────────────────────────────────────
        "menu.file" => if fr { "Fichier" } else { "File" },
        "menu.new" => if fr { "Nouveau plan" } else { "New layout" },
        "menu.open" => if fr { "Ouvrir..." } else { "Open..." },
        "menu.open_title" => if fr { "Ouvrir un plan JSON" } else { "Open layout JSON" },
        "menu.save" => if fr { "Enregistrer..." } else { "Save..." },
        "menu.save_title" => if fr { "Enregistrer le plan JSON" } else { "Save layout JSON" },
        "menu.quit" => if fr { "Quitter" } else { "Quit" },
        "menu.view" => if fr { "Affichage" } else { "View" },
        "menu.reset_camera" => if fr { "Réinitialiser la caméra" } else { "Reset camera" },
        "menu.grid" => if fr { "Grille" } else { "Grid" },
        "menu.language" => if fr { "Langue" } else { "Language" },

        // ── Tools ───────────────────────────────────────────
        "tool.select" => if fr { "Sélection" } else { "Select" },
        "tool.add" => if fr { "Ajouter" } else { "Add" },
        "tool.move" => if fr { "Déplacer" } else { "Move" },
        "tool.rotate" => if fr { "Pivoter" } else { "Rotate" },
        "tool.duplicate" => if fr { "Dupliquer" } else { "Duplicate" },
        "tool.delete" => if fr { "Supprimer" } else { "Delete" },

        // ── Side panel ──────────────────────────────────────
        "panel.element" => if fr { "Élément" } else { "Element" },
        "panel.custom" => if fr { "Personnalisé..." } else { "Custom..." },
        "panel.custom_name" => if fr { "Nom" } else { "Name" },
        "panel.width" => if fr { "Largeur (cm)" } else { "Width (cm)" },
        "panel.height" => if fr { "Hauteur (cm)" } else { "Height (cm)" },
        "panel.depth" => if fr { "Profondeur (cm)" } else { "Depth (cm)" },
        "panel.joint" => if fr { "Joint (cm)" } else { "Joint (cm)" },
        "panel.course" => if fr { "Assise" } else { "Course" },
        "panel.create_course" => if fr { "Créer une assise" } else { "Create course" },
        "panel.count" => if fr { "Éléments placés" } else { "Placed elements" },

        // ── Placement controls ──────────────────────────────
        "place.title" => if fr { "Positionnement" } else { "Positioning" },
        "place.up" => if fr { "Monter" } else { "Up" },
        "place.down" => if fr { "Descendre" } else { "Down" },
        "place.confirm" => if fr { "Placer" } else { "Place" },
        "place.confirm_move" => if fr { "Confirmer" } else { "Confirm" },
        "place.cancel" => if fr { "Annuler" } else { "Cancel" },

        // ── Info text ───────────────────────────────────────
        "info.select" => if fr { "Mode : Sélection / Navigation" } else { "Mode: Select / Navigate" },
        "info.selected" => if fr { "Mode : Sélectionné (ID : {})" } else { "Mode: Selected (ID: {})" },
        "info.select_hint" => if fr { " (Clic/Appui long, Glisser : Orbiter)" } else { " (Click/Long press, Drag: Orbit)" },
        "info.add_idle" => if fr { "Mode : Ajouter ({}) - Cliquez pour positionner" } else { "Mode: Add ({}) - Click to position" },
        "info.add_positioning" => if fr {
            "Positionnement ({}) : Ajustez (Flèches/PgUpDn), Rotation (QE), puis Placer (Entrée) ou Annuler (Échap)"
        } else {
            "Positioning ({}): Adjust (Arrows/PgUpDn), Rotate (QE), then Place (Enter) or Cancel (Esc)"
        },
        "info.move_positioning" => if fr {
            "Déplacement ({}) : Ajustez (Flèches/PgUpDn), Rotation (QE), puis Confirmer (Entrée) ou Annuler (Échap)"
        } else {
            "Moving ({}): Adjust (Arrows/PgUpDn), Rotate (QE), then Confirm (Enter) or Cancel (Esc)"
        },
        "info.move_ready" => if fr { "Mode : Déplacer (Prêt pour ID : {})" } else { "Mode: Move (ready for ID: {})" },
        "info.move_idle" => if fr { "Mode : Déplacer (Sélectionnez d'abord)" } else { "Mode: Move (select first)" },
        "info.duplicate" => if fr { "Mode : Dupliquer ({}) - Cliquez pour placer la copie" } else { "Mode: Duplicate ({}) - Click to place the copy" },
        "info.duplicate_idle" => if fr { "Mode : Dupliquer (Sélectionnez d'abord)" } else { "Mode: Duplicate (select first)" },
        "info.invalid" => if fr { "Invalide" } else { "Invalid" },
        "info.course" => if fr { " | Assise : {}" } else { " | Course: {}" },

        // ── Notifications ───────────────────────────────────
        "notify.no_surface" => if fr { "Cliquez sur le sol ou sur un élément posé." } else { "Click on the ground or on a placed element." },
        "notify.invalid_input" => if fr { "Valeur invalide : {}" } else { "Invalid value: {}" },
        "notify.invalid_height" => if fr { "La hauteur de l'élément est invalide pour créer une assise." } else { "The element height is not valid for a course." },
        "notify.invalid_type" => if fr { "Type d'élément invalide : {}" } else { "Invalid element type: {}" },
        "notify.duplicate_course" => if fr { "Une assise de hauteur {} cm existe déjà." } else { "A course of height {} cm already exists." },
        "notify.io" => if fr { "Erreur de fichier : {}" } else { "File error: {}" },
        "notify.loaded" => if fr { "Plan chargé ({} éléments)" } else { "Layout loaded ({} elements)" },
        "notify.saved" => if fr { "Plan enregistré" } else { "Layout saved" },

        // ── Context menu ────────────────────────────────────
        "ctx.rotate" => if fr { "Pivoter 45°" } else { "Rotate 45°" },
        "ctx.move" => if fr { "Déplacer" } else { "Move" },
        "ctx.duplicate" => if fr { "Dupliquer" } else { "Duplicate" },
        "ctx.delete" => if fr { "Supprimer" } else { "Delete" },

        // ── Toolbar navigation ──────────────────────────────
        "tb.orbit_left" => if fr { "Pivoter la vue à gauche" } else { "Orbit left" },
        "tb.orbit_right" => if fr { "Pivoter la vue à droite" } else { "Orbit right" },
        "tb.zoom_in" => if fr { "Zoom avant" } else { "Zoom in" },
        "tb.zoom_out" => if fr { "Zoom arrière" } else { "Zoom out" },

        // ── Status bar ──────────────────────────────────────
        "status.elements" => if fr { "Éléments" } else { "Elements" },
        "status.selected" => if fr { "Sélection" } else { "Selected" },
        "status.none" => if fr { "aucune" } else { "none" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// `t(key)` with each `{}` replaced by the next argument
pub fn tf(key: &str, args: &[&str]) -> String {
    let mut out = String::new();
    let mut rest = t(key);
    for arg in args {
        match rest.find("{}") {
            Some(i) => {
                out.push_str(&rest[..i]);
                out.push_str(arg);
                rest = &rest[i + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_french() {
        assert_eq!(t("tool.add"), "Ajouter");
        assert_eq!(t("no.such.key"), "???");
    }

    #[test]
    fn test_tf_substitutes_in_order() {
        assert_eq!(tf("info.selected", &["7"]), "Mode : Sélectionné (ID : 7)");
        assert_eq!(tf("info.course", &[]), " | Assise : {}");
    }
}
