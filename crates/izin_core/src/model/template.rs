//! Letter templates and their seeded defaults.
//!
//! # Invariants
//! - A template body is plain text with zero or more `{{token}}` placeholders.
//! - `category` is matched by exact string equality during auto-selection.

use super::category::{CATEGORY_HALAQAH, CATEGORY_KBM};
use super::EntryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_KBM_NAME: &str = "Izin Tidak Mengajar (KBM)";
const DEFAULT_HALAQAH_NAME: &str = "Izin Halaqah";

const DEFAULT_KBM_BODY: &str = "Assalamu'alaikum warahmatullahi wabarakatuh.

Yang bertanda tangan di bawah ini:
Nama: {{nama}}
NIP: {{nip}}
Unit: {{unit}}
Jabatan: {{jabatan}}

Dengan ini mengajukan {{jenis_izin}} pada hari {{tanggal}} dikarenakan {{alasan}}.

Adapun jadwal KBM yang ditinggalkan:
{{jadwal_kbm}}

Demikian permohonan ini saya sampaikan. Jazakumullahu khairan.

Wassalamu'alaikum warahmatullahi wabarakatuh.";

const DEFAULT_HALAQAH_BODY: &str = "Assalamu'alaikum warahmatullahi wabarakatuh.

Yang bertanda tangan di bawah ini:
Nama: {{nama}}
Jabatan: {{jabatan_tambahan}}

Dengan ini mengajukan {{jenis_izin}} pada hari {{tanggal}} untuk kelompok {{halaqah_kelompok}} dikarenakan {{alasan}}.
Selama saya berhalangan, halaqah akan digantikan oleh {{halaqah_pengganti}}.

Demikian permohonan ini saya sampaikan. Jazakumullahu khairan.

Wassalamu'alaikum warahmatullahi wabarakatuh.";

/// Named letter body with an optional category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: EntryId,
    /// Display name shown in template pickers.
    pub name: String,
    pub body: String,
    /// Category tag used for auto-selection.
    #[serde(default)]
    pub category: Option<String>,
}

impl Template {
    /// Creates a template with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        body: impl Into<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            body: body.into(),
            category,
        }
    }
}

/// Returns the seeded default templates, one per protected category.
pub fn default_templates() -> Vec<Template> {
    vec![
        Template::new(
            DEFAULT_KBM_NAME,
            DEFAULT_KBM_BODY,
            Some(CATEGORY_KBM.to_string()),
        ),
        Template::new(
            DEFAULT_HALAQAH_NAME,
            DEFAULT_HALAQAH_BODY,
            Some(CATEGORY_HALAQAH.to_string()),
        ),
    ]
}

/// Picks the template for `category`: exact tag match, else the first one.
///
/// Returns `None` only when `templates` is empty.
pub fn select_template<'a>(templates: &'a [Template], category: &str) -> Option<&'a Template> {
    templates
        .iter()
        .find(|template| template.category.as_deref() == Some(category))
        .or_else(|| templates.first())
}

#[cfg(test)]
mod tests {
    use super::{default_templates, select_template, Template};

    #[test]
    fn defaults_cover_both_protected_categories() {
        let templates = default_templates();
        assert_eq!(templates.len(), 2);
        assert!(templates[0].body.contains("{{jadwal_kbm}}"));
        assert!(templates[1].body.contains("{{halaqah_kelompok}}"));
    }

    #[test]
    fn select_template_prefers_exact_category_match() {
        let templates = default_templates();
        let selected = select_template(&templates, "Izin Halaqah").unwrap();
        assert_eq!(selected.id, templates[1].id);
    }

    #[test]
    fn select_template_is_case_sensitive_and_falls_back_to_first() {
        let templates = default_templates();
        let selected = select_template(&templates, "izin halaqah").unwrap();
        assert_eq!(selected.id, templates[0].id);
    }

    #[test]
    fn select_template_returns_none_without_templates() {
        let templates: Vec<Template> = Vec::new();
        assert!(select_template(&templates, "Izin KBM").is_none());
    }
}
