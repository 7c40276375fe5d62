//! Line templates and the minijinja environment backing named templates.

use std::collections::BTreeSet;

use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::errors::TemplateError;
use crate::domain::model::ScaledValue;

pub const ENERGY_SCAN_TEMPLATE: &str = "energy-scan";
pub const POSITION_SCAN_TEMPLATE: &str = "position-scan";
pub const ENERGY_SCAN_ADDBACK_TEMPLATE: &str = "energy-scan-addback";

/// Renders the text of one output line, without its terminator.
pub trait LineTemplate {
    fn render_line(&self, raw: i64, scaled: ScaledValue) -> Result<String, TemplateError>;
}

impl<F> LineTemplate for F
where
    F: Fn(i64, ScaledValue) -> String,
{
    fn render_line(&self, raw: i64, scaled: ScaledValue) -> Result<String, TemplateError> {
        Ok(self(raw, scaled))
    }
}

/// Named templates rendered with `raw` (integer) and `scaled` (preformatted text).
pub struct TemplateSet {
    env: Environment<'static>,
    names: BTreeSet<String>,
}

impl TemplateSet {
    /// Create an environment without any registered templates.
    pub fn empty() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self {
            env,
            names: BTreeSet::new(),
        }
    }

    /// Create an environment with the built-in scan templates loaded.
    pub fn with_builtins() -> Result<Self, TemplateError> {
        let mut set = Self::empty();
        for &(name, source) in BUILTIN_TEMPLATES {
            set.env
                .add_template(name, source)
                .map_err(|source| TemplateError::Invalid {
                    name: name.to_owned(),
                    source,
                })?;
            set.names.insert(name.to_owned());
        }
        Ok(set)
    }

    /// Register or replace a template from an owned source.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        self.env
            .add_template_owned(name.clone(), source.into())
            .map_err(|source| TemplateError::Invalid {
                name: name.clone(),
                source,
            })?;
        self.names.insert(name);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Result<NamedTemplate<'_>, TemplateError> {
        if !self.contains(name) {
            return Err(TemplateError::Unknown(name.to_owned()));
        }
        let template = self
            .env
            .get_template(name)
            .map_err(|source| TemplateError::Invalid {
                name: name.to_owned(),
                source,
            })?;
        Ok(NamedTemplate {
            name: name.to_owned(),
            template,
        })
    }
}

/// A template borrowed from a [`TemplateSet`].
pub struct NamedTemplate<'env> {
    name: String,
    template: minijinja::Template<'env, 'env>,
}

impl NamedTemplate<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl LineTemplate for NamedTemplate<'_> {
    fn render_line(&self, raw: i64, scaled: ScaledValue) -> Result<String, TemplateError> {
        self.template
            .render(context! { raw => raw, scaled => scaled.to_string() })
            .map_err(|source| TemplateError::Render {
                name: self.name.clone(),
                source,
            })
    }
}

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (ENERGY_SCAN_TEMPLATE, ENERGY_SCAN_SOURCE),
    (POSITION_SCAN_TEMPLATE, POSITION_SCAN_SOURCE),
    (ENERGY_SCAN_ADDBACK_TEMPLATE, ENERGY_SCAN_ADDBACK_SOURCE),
];

const ENERGY_SCAN_SOURCE: &str = r#"convertRoot("CeBr3_48mmx48mmx48mm_20x1x1crystals_R173.628mm_gamma{{ scaled }}MeV__wallThick_mm_point_sourcePosition_129mm__gap3mm", {{ scaled }}, {{ raw }},1);"#;

const POSITION_SCAN_SOURCE: &str = r#"convertRoot("CeBr3_48mmx48mmx48mm_15x1x3crystals_R131.25mm_gamma1.33249MeV_Aluminum5083_Chamber_wallThick_3mm_point_sourcePosition_{{ raw }}mm_FCEpoxy_epoxy_gap3mm", {{ raw }}, 1);"#;

const ENERGY_SCAN_ADDBACK_SOURCE: &str = r#"scanHisto("AddBack_CeBr3_48mmx48mmx48mm_15x1x3crystals_R131.25mm_gamma{{ scaled }}MeV_Aluminum5083_Chamber_wallThick_3mm_point_sourcePosition_129mm_FCEpoxy_epoxy_gap3mm", {{ scaled }}, {{ raw }},1);"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_energy_template_matches_call_syntax() {
        let set = TemplateSet::with_builtins().unwrap();
        let template = set.get(ENERGY_SCAN_TEMPLATE).unwrap();
        let line = template
            .render_line(20, ScaledValue::Fractional(0.02))
            .unwrap();
        assert_eq!(
            line,
            "convertRoot(\"CeBr3_48mmx48mmx48mm_20x1x1crystals_R173.628mm_gamma0.02MeV__wallThick_mm_point_sourcePosition_129mm__gap3mm\", 0.02, 20,1);"
        );
    }

    #[test]
    fn builtin_position_template_uses_raw_index() {
        let set = TemplateSet::with_builtins().unwrap();
        let template = set.get(POSITION_SCAN_TEMPLATE).unwrap();
        let line = template.render_line(7, ScaledValue::Integral(7)).unwrap();
        assert!(line.contains("sourcePosition_7mm_FCEpoxy"));
        assert!(line.ends_with("\", 7, 1);"));
    }

    #[test]
    fn user_templates_can_be_added_and_replaced() {
        let mut set = TemplateSet::with_builtins().unwrap();
        set.insert("custom", "probe({{ raw }}, {{ scaled }});").unwrap();
        let line = set
            .get("custom")
            .unwrap()
            .render_line(1500, ScaledValue::Fractional(1.5))
            .unwrap();
        assert_eq!(line, "probe(1500, 1.5);");

        set.insert("custom", "other({{ raw }});").unwrap();
        let line = set
            .get("custom")
            .unwrap()
            .render_line(3, ScaledValue::Integral(3))
            .unwrap();
        assert_eq!(line, "other(3);");
    }

    #[test]
    fn unknown_variables_fail_to_render() {
        let mut set = TemplateSet::empty();
        set.insert("typo", "{{ scaeld }}").unwrap();
        let err = set
            .get("typo")
            .unwrap()
            .render_line(1, ScaledValue::Integral(1))
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn missing_templates_are_reported_by_name() {
        let set = TemplateSet::with_builtins().unwrap();
        match set.get("nope") {
            Err(TemplateError::Unknown(name)) => assert_eq!(name, "nope"),
            _ => panic!("expected unknown template error"),
        }
    }

    #[test]
    fn invalid_syntax_is_rejected_on_insert() {
        let mut set = TemplateSet::empty();
        let err = set.insert("broken", "{{ raw ").unwrap_err();
        assert!(matches!(err, TemplateError::Invalid { .. }));
    }

    #[test]
    fn closures_are_templates() {
        let template = |raw: i64, scaled: ScaledValue| format!("{raw}/{scaled}");
        assert_eq!(
            template.render_line(2000, ScaledValue::Integral(2)).unwrap(),
            "2000/2"
        );
    }
}
