//! Shared fixtures for tests across the workspace.
//!
//! Catalog rows use the default column layout (A..R):
//! fork code, shock code, combi code, brand, model, year, fork spring,
//! shock spring, oil type, oil level, fork preload, shock preload, fork sag,
//! shock sag, fork compression, shock compression, fork info, rear info.

use std::fs;
use std::path::Path;

/// Spreadsheet export with a header row and four products.
///
/// - row 1: the HARLEY DAVIDSON combi product used by the end-to-end scenario
/// - row 2: fork-only product whose fork code is `DUP-1`
/// - row 3: shock-only product whose shock code is also `DUP-1`
/// - row 4: product with numeric cells and long rear notes
pub const SAMPLE_CATALOG_JSON: &str = r#"[
  ["Fork Kit", "Shock Kit", "Combi Kit", "Brand", "Model", "Year", "Fork Spring", "Shock Spring", "Oil", "Oil Level", "Fork Preload", "Shock Preload", "Fork Sag", "Shock Sag", "Fork Comp", "Shock Comp", "Fork Info", "Rear Info"],
  ["SP-HD14-SSA001REV", "SP-HD14-SSD001REV", "SP-HD14-SSE001REV", "HARLEY DAVIDSON", "FXDX SUPER GLIDE SPORT", "1999-2005", "0.90", "9.5", "SAE 10", "120mm", "5mm", "8mm", "35mm", "15mm", "12", "10", "Replace fork seals", ""],
  ["DUP-1", "", "", "YAMAHA", "YZ250F", "2019", "0.46", "", "SAE 5", "350cc", "", "", "", "", "", "", "", ""],
  ["", "DUP-1", "", "HONDA", "CRF450R", "2021", "", "5.6", "", "", "", "", "", "", "", "", "", ""],
  ["KTM-FK-77", "KTM-SH-77", "", "KTM", "690 ENDURO R", 2020, 0.48, 6.2, "SAE 5", 110, null, null, null, null, null, null, null, "Fit with 690 linkage ^ check ~ clearance"]
]"#;

/// Large-label template exercising every variable the label builder produces.
pub const LARGE_TEMPLATE: &str = "^XA
^CI28
^FO40,30^A0N,{{brand_font_size}},{{brand_font_size}}^FH_^FD{{brand_name}}^FS
^FO40,90^A0N,{{model_font_size}},{{model_font_size}}^FH_^FD{{model_type}} {{year}}^FS
^FO40,160^A0N,{{kit_font_size}},{{kit_font_size}}^FH_^FD{{kit_info}}^FS
^FO40,210^A0N,24,24^FH_^FDSpring F/R: {{fork_spring}} / {{shock_spring}}^FS
^FO40,250^A0N,24,24^FH_^FDOil: {{oil_type}} {{oil_level}}^FS
^FO40,290^A0N,24,24^FH_^FDPreload F/R: {{fork_preload}} / {{shock_preload}}^FS
^FO40,330^A0N,24,24^FH_^FDSag F/R: {{fork_sag}} / {{shock_sag}}^FS
^FO40,370^A0N,24,24^FH_^FDComp F/R: {{fork_compression}} / {{shock_compression}}^FS
^FO40,420^A0N,{{notes_font_size}},{{notes_font_size}}^FH_^FD{{notes}}^FS
^XZ";

/// Small fork-label template.
pub const SMALL_FORK_TEMPLATE: &str = "^XA
^FO20,20^A0N,{{small_brand_font_size}},{{small_brand_font_size}}^FH_^FD{{brand_name}}^FS
^FO20,60^A0N,{{small_model_font_size}},{{small_model_font_size}}^FH_^FD{{model_type}}^FS
^FO20,100^A0N,22,22^FH_^FD{{fork_code}} / {{fork_spring}}^FS
^XZ";

/// Small shock-label template.
pub const SMALL_SHOCK_TEMPLATE: &str = "^XA
^FO20,20^A0N,{{small_brand_font_size}},{{small_brand_font_size}}^FH_^FD{{brand_name}}^FS
^FO20,60^A0N,{{small_model_font_size}},{{small_model_font_size}}^FH_^FD{{model_type}}^FS
^FO20,100^A0N,22,22^FH_^FD{{shock_code}} / {{shock_spring}}^FS
^XZ";

/// Minimal configuration pointing at the fixture files written by
/// [`write_fixture_workspace`].
pub const FIXTURE_CONFIG_TOML: &str = r#"[catalog]
path = "catalog.json"
skip_rows = 1

[templates]
dir = "templates"

[output]
dir = "out"
"#;

/// Write a complete kitlabel workspace (config, catalog, templates) into `root`.
///
/// # Panics
///
/// Panics if any fixture file cannot be written; this is test-only code.
pub fn write_fixture_workspace(root: &Path) {
    let config_dir = root.join(".kitlabel");
    let templates_dir = root.join("templates");
    fs::create_dir_all(&config_dir).expect("create .kitlabel");
    fs::create_dir_all(&templates_dir).expect("create templates");

    fs::write(config_dir.join("config.toml"), FIXTURE_CONFIG_TOML).expect("write config");
    fs::write(root.join("catalog.json"), SAMPLE_CATALOG_JSON).expect("write catalog");
    fs::write(templates_dir.join("large.zpl"), LARGE_TEMPLATE).expect("write large");
    fs::write(templates_dir.join("small_fork.zpl"), SMALL_FORK_TEMPLATE)
        .expect("write small fork");
    fs::write(templates_dir.join("small_shock.zpl"), SMALL_SHOCK_TEMPLATE)
        .expect("write small shock");
}
