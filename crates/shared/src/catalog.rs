//! Built-in element catalog (dimensions in cm: width, height, depth)

use crate::{Dimensions, ElementTypeDef, Rgb, TypeId};

/// One predefined element type
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: TypeId,
    pub name: String,
    pub dimensions: Dimensions,
    pub color: Rgb,
}

impl CatalogEntry {
    pub fn to_type_def(&self) -> ElementTypeDef {
        ElementTypeDef {
            name: self.name.clone(),
            dimensions: self.dimensions,
            color: self.color,
            is_custom: false,
            origin_type_id: Some(self.id.clone()),
        }
    }

    /// Selector label, e.g. "Brique M50 (19 x 5 x 9 cm)"
    pub fn label(&self) -> String {
        let [w, h, d] = self.dimensions.to_array();
        format!("{} ({w} x {h} x {d} cm)", self.name)
    }
}

/// Ordered, read-only table of element types
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const BUILTIN: &[(&str, &str, [f64; 3], u32)] = &[
    ("M50", "Brique M50", [19.0, 5.0, 9.0], 0xCC6633),
    ("M57", "Brique M57", [19.0, 5.7, 9.0], 0xCC6633),
    ("M65", "Brique M65", [19.0, 6.5, 9.0], 0xCC6633),
    ("M90", "Brique M90", [19.0, 9.0, 9.0], 0xCC6633),
    ("WF", "Brique WF", [21.0, 5.0, 10.0], 0xD2691E),
    ("WFD", "Brique WFD", [21.0, 6.5, 10.0], 0xD2691E),
    ("M50c", "M50 champ", [9.0, 19.0, 5.0], 0xB87333),
    ("M57c", "M57 champ", [9.0, 19.0, 5.7], 0xB87333),
    ("M65c", "M65 champ", [9.0, 19.0, 6.5], 0xB87333),
    ("M90c", "M90 champ", [9.0, 19.0, 9.0], 0xB87333),
    ("WFc", "WF champ", [10.0, 21.0, 5.0], 0xC0C0C0),
    ("WFDc", "WFD champ", [10.0, 21.0, 6.5], 0xC0C0C0),
    ("B9", "Bloc 9", [39.0, 19.0, 9.0], 0xAAAAAA),
    ("B14", "Bloc 14", [39.0, 19.0, 14.0], 0xAAAAAA),
    ("B19", "Bloc 19", [39.0, 19.0, 19.0], 0xAAAAAA),
    ("B29", "Bloc 29", [39.0, 19.0, 29.0], 0xAAAAAA),
    ("V1", "Vide 1cm", [40.0, 19.0, 1.0], 0xDDDDDD),
    ("V2", "Vide 2cm", [40.0, 19.0, 2.0], 0xDDDDDD),
    ("V3", "Vide 3cm", [40.0, 19.0, 3.0], 0xDDDDDD),
    ("V4", "Vide 4cm", [40.0, 19.0, 4.0], 0xDDDDDD),
    ("V5", "Vide 5cm", [40.0, 19.0, 5.0], 0xDDDDDD),
    ("L120_14", "Lint 120x14", [120.0, 19.0, 14.0], 0x888888),
    ("L140_14", "Lint 140x14", [140.0, 19.0, 14.0], 0x888888),
    ("L160_14", "Lint 160x14", [160.0, 19.0, 14.0], 0x888888),
    ("L180_14", "Lint 180x14", [180.0, 19.0, 14.0], 0x888888),
    ("L200_14", "Lint 200x14", [200.0, 19.0, 14.0], 0x888888),
    ("L220_14", "Lint 220x14", [220.0, 19.0, 14.0], 0x888888),
    ("L240_14", "Lint 240x14", [240.0, 19.0, 14.0], 0x888888),
    ("L260_14", "Lint 260x14", [260.0, 19.0, 14.0], 0x888888),
    ("L280_14", "Lint 280x14", [280.0, 19.0, 14.0], 0x888888),
    ("L300_14", "Lint 300x14", [300.0, 19.0, 14.0], 0x888888),
    ("L100_9", "Lint 100x9", [100.0, 19.0, 9.0], 0x888888),
    ("L120_9", "Lint 120x9", [120.0, 19.0, 9.0], 0x888888),
    ("L160_9", "Lint 160x9", [160.0, 19.0, 9.0], 0x888888),
    ("L180_9", "Lint 180x9", [180.0, 19.0, 9.0], 0x888888),
    ("L200_9", "Lint 200x9", [200.0, 19.0, 9.0], 0x888888),
    ("L220_9", "Lint 220x9", [220.0, 19.0, 9.0], 0x888888),
    ("L240_9", "Lint 240x9", [240.0, 19.0, 9.0], 0x888888),
    ("L260_9", "Lint 260x9", [260.0, 19.0, 9.0], 0x888888),
    ("L280_9", "Lint 280x9", [280.0, 19.0, 9.0], 0x888888),
    ("L300_9", "Lint 300x9", [300.0, 19.0, 9.0], 0x888888),
    ("L100_19", "Lint 100x19", [100.0, 19.0, 19.0], 0x888888),
    ("L120_19", "Lint 120x19", [120.0, 19.0, 19.0], 0x888888),
    ("L160_19", "Lint 160x19", [160.0, 19.0, 19.0], 0x888888),
    ("L180_19", "Lint 180x19", [180.0, 19.0, 19.0], 0x888888),
    ("L200_19", "Lint 200x19", [200.0, 19.0, 19.0], 0x888888),
    ("L220_19", "Lint 220x19", [220.0, 19.0, 19.0], 0x888888),
    ("L240_19", "Lint 240x19", [240.0, 19.0, 19.0], 0x888888),
    ("L260_19", "Lint 260x19", [260.0, 19.0, 19.0], 0x888888),
    ("L280_19", "Lint 280x19", [280.0, 19.0, 19.0], 0x888888),
    ("L300_19", "Lint 300x19", [300.0, 19.0, 19.0], 0x888888),
    ("BCA60_9", "BC Ass 60x9", [60.0, 20.0, 9.0], 0xE0E0E0),
    ("BCA60_14", "BC Ass 60x14", [60.0, 20.0, 14.0], 0xE0E0E0),
    ("BCA60_19", "BC Ass 60x19", [60.0, 20.0, 19.0], 0xE0E0E0),
    ("BC60_10", "BC 60x10", [60.0, 25.0, 10.0], 0xF0F0F0),
    ("BC60_15", "BC 60x15", [60.0, 25.0, 15.0], 0xF0F0F0),
    ("BC60_20", "BC 60x20", [60.0, 25.0, 20.0], 0xF0F0F0),
    ("BC60_24", "BC 60x24", [60.0, 25.0, 24.0], 0xF0F0F0),
    ("BC60_30", "BC 60x30", [60.0, 25.0, 30.0], 0xF0F0F0),
    ("BC60_36", "BC 60x36.5", [60.0, 25.0, 36.5], 0xF0F0F0),
    ("PUR5", "PUR 5cm", [120.0, 60.0, 5.0], 0xFFFF99),
    ("PUR6", "PUR 6cm", [120.0, 60.0, 6.0], 0xFFFF99),
    ("PUR7", "PUR 7cm", [120.0, 60.0, 7.0], 0xFFFF99),
    ("PUR8", "PUR 8cm", [120.0, 60.0, 8.0], 0xFFFF99),
    ("PUR9", "PUR 9cm", [120.0, 60.0, 9.0], 0xFFFF99),
    ("PUR10", "PUR 10cm", [120.0, 60.0, 10.0], 0xFFFF99),
    ("PUR11", "PUR 11cm", [120.0, 60.0, 11.0], 0xFFFF99),
    ("PUR12", "PUR 12cm", [120.0, 60.0, 12.0], 0xFFFF99),
    ("PUR13", "PUR 13cm", [120.0, 60.0, 13.0], 0xFFFF99),
    ("PUR14", "PUR 14cm", [120.0, 60.0, 14.0], 0xFFFF99),
    ("PUR15", "PUR 15cm", [120.0, 60.0, 15.0], 0xFFFF99),
    ("PUR16", "PUR 16cm", [120.0, 60.0, 16.0], 0xFFFF99),
    ("PUR18", "PUR 18cm", [120.0, 60.0, 18.0], 0xFFFF99),
    ("PROFIL", "Profil", [250.0, 6.5, 6.5], 0xC0C0C0),
];

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Bricks, blocks, voids, lintels, cellular concrete, PUR panels and profile
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(id, name, dims, color)| CatalogEntry {
                id: (*id).to_string(),
                name: (*name).to_string(),
                dimensions: Dimensions::from_array(*dims),
                color: Rgb::from_hex(*color),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|e| e.id.as_str())
    }

    /// Catalog key whose name matches exactly and whose dimensions match within tolerance
    pub fn find_matching(&self, def: &ElementTypeDef) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == def.name && e.dimensions.approx_eq(&def.dimensions))
            .map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
