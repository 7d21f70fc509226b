//! # README Generation
//!
//! Renders the Markdown README attached to each release. Output depends only
//! on its inputs, so repeated runs produce byte-identical files.

use crate::breakdown::Breakdown;
use crate::naming::ArtifactNames;
use crate::primitives::README_TITLE;

/// Everything the README mentions.
#[derive(Debug, Clone, Copy)]
pub struct ReadmeContext<'a> {
    pub names: &'a ArtifactNames,
    pub version: &'a str,
    pub full_count: usize,
    pub core_count: usize,
    pub top_level: &'a Breakdown,
}

/// Render the README text. Every line, including the last, ends in `\n`.
#[must_use]
pub fn render_readme(ctx: &ReadmeContext<'_>) -> String {
    let full = &ctx.names.full_definition;
    let core = &ctx.names.core_variables;

    let mut out = String::new();
    out.push_str(README_TITLE);
    out.push('\n');
    out.push('\n');
    out.push_str("There are two files here:\n");
    out.push('\n');
    out.push_str(&format!(
        "1. `{full}`: This contains all the defined variables\n"
    ));
    out.push_str(&format!(
        "1. `{core}`: This contains only the core variables\n"
    ));
    out.push('\n');
    out.push_str(&format!(
        "Start with `{core}`, these are the key variables we need in submissions.\n"
    ));
    out.push_str(&format!(
        "Then, if you have time and energy, move onto including the variables in `{full}`.\n"
    ));
    out.push('\n');
    out.push_str(&format!(
        "In this version ({}), there are {} variables in the full set and {} variables in the core set.\n",
        ctx.version, ctx.full_count, ctx.core_count
    ));
    out.push_str("The core variables are broken down in the following top-level categories:\n");
    out.push('\n');
    for entry in ctx.top_level.entries() {
        out.push_str(&format!("1. {}: {}\n", entry.prefix, entry.count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VariableTable;

    fn core_table() -> VariableTable {
        let columns = ["variable", "land", "emissions", "energy", "cdr", "macro"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let raw = ["Emissions|CH4", "Emissions|CO2", "Land Cover"]
            .iter()
            .map(|v| vec![Some((*v).to_string()), Some("x".to_string())]);
        VariableTable::new(columns, raw).expect("table")
    }

    #[test]
    fn renders_exact_layout() {
        let core = core_table();
        let names = ArtifactNames::for_version("1.2.0");
        let top_level = Breakdown::top_level(&core);
        let text = render_readme(&ReadmeContext {
            names: &names,
            version: "1.2.0",
            full_count: 10,
            core_count: core.len(),
            top_level: &top_level,
        });

        let expected = "\
# ScenarioMIP core variables

There are two files here:

1. `ScenarioMIP_coreVariables_full_1-2-0.xlsx`: This contains all the defined variables
1. `ScenarioMIP_coreVariables_only-core_1-2-0.csv`: This contains only the core variables

Start with `ScenarioMIP_coreVariables_only-core_1-2-0.csv`, these are the key variables we need in submissions.
Then, if you have time and energy, move onto including the variables in `ScenarioMIP_coreVariables_full_1-2-0.xlsx`.

In this version (1.2.0), there are 10 variables in the full set and 3 variables in the core set.
The core variables are broken down in the following top-level categories:

1. Emissions: 2
1. Land Cover: 1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_core_set_has_no_category_lines() {
        let names = ArtifactNames::for_version("0.0.1");
        let empty = core_table().core_subset().with_rows(Vec::new());
        let top_level = Breakdown::top_level(&empty);
        let text = render_readme(&ReadmeContext {
            names: &names,
            version: "0.0.1",
            full_count: 0,
            core_count: 0,
            top_level: &top_level,
        });
        assert!(text.ends_with("top-level categories:\n\n"));
    }
}
