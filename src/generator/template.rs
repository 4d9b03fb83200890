use crate::error::WorkflowError;
use crate::generator::{GeneratedContent, GenerationRequest};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub type Vars = BTreeMap<String, String>;

/// Substitute `{{name}}` placeholders. Whitespace inside the braces is
/// ignored; an opening `{{` with no closing `}}` is copied as-is.
pub fn render(template: &str, vars: &Vars) -> Result<String, WorkflowError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                let value = vars
                    .get(name)
                    .ok_or_else(|| WorkflowError::MissingPlaceholder(name.to_string()))?;
                output.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}

/// Placeholder names used by a template, in order of first use
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim().to_string();
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &after[end + 2..];
    }
    names
}

/// One pre-written version of a piece of copy
#[derive(Debug)]
pub struct Variant {
    pub name: &'static str,
    /// (section name, template) pairs, in output order
    pub sections: &'static [(&'static str, &'static str)],
}

/// Shared machinery behind the generators: variant selection, default
/// values and the artificial delay
pub struct TemplateSet {
    variants: &'static [Variant],
    defaults: &'static [(&'static str, &'static str)],
    cursor: AtomicUsize,
    delay: Duration,
}

impl TemplateSet {
    pub fn new(
        variants: &'static [Variant],
        defaults: &'static [(&'static str, &'static str)],
        delay: Duration,
    ) -> Self {
        Self {
            variants,
            defaults,
            cursor: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.variants.iter().map(|v| v.name).collect()
    }

    /// The requested variant, or the next one in rotation. Rotation only
    /// advances once `vars` fills every placeholder of every variant.
    pub fn pick(&self, requested: Option<usize>, vars: &Vars) -> Result<usize, WorkflowError> {
        let count = self.variants.len();
        match requested {
            Some(index) if index < count => Ok(index),
            Some(index) => Err(WorkflowError::VariantOutOfRange { index, count }),
            None => {
                self.require_all(vars)?;
                Ok(self.cursor.fetch_add(1, Ordering::Relaxed) % count.max(1))
            }
        }
    }

    /// `MissingPlaceholder` for the first placeholder, in variant order,
    /// that `vars` leaves unset
    pub fn require_all(&self, vars: &Vars) -> Result<(), WorkflowError> {
        let missing = self
            .variants
            .iter()
            .flat_map(|variant| variant.sections.iter())
            .flat_map(|(_, template)| placeholders(template))
            .find(|name| !vars.contains_key(name));
        match missing {
            Some(name) => Err(WorkflowError::MissingPlaceholder(name)),
            None => Ok(()),
        }
    }

    /// Variant the next unpinned request will use
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Relaxed) % self.variants.len().max(1)
    }

    /// Continue the rotation from `index`
    pub fn resume_at(&self, index: usize) {
        self.cursor
            .store(index % self.variants.len().max(1), Ordering::Relaxed);
    }

    /// Defaults overlaid with the request's values; blank values count as unset
    pub fn vars(&self, request: &GenerationRequest) -> Vars {
        let mut vars: Vars = self
            .defaults
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (key, value) in &request.vars {
            let value = value.trim();
            if !value.is_empty() {
                vars.insert(key.clone(), value.to_string());
            }
        }
        vars
    }

    /// Wait out the delay, then fill every section of variant `index`
    pub async fn produce(
        &self,
        kind: &'static str,
        index: usize,
        vars: &Vars,
    ) -> Result<GeneratedContent, WorkflowError> {
        let variant = self.variants.get(index).ok_or(WorkflowError::VariantOutOfRange {
            index,
            count: self.variants.len(),
        })?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut sections = Vec::with_capacity(variant.sections.len());
        for (name, template) in variant.sections {
            sections.push((name.to_string(), render(template, vars)?));
        }

        log::debug!("Generated {} variant '{}'", kind, variant.name);
        Ok(GeneratedContent {
            kind,
            variant: index,
            variant_name: variant.name.to_string(),
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vars {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_render_substitutes() {
        let out = render("Hi {{name}}, meet {{ brand }}!", &vars(&[("name", "Sam"), ("brand", "Clip")])).unwrap();
        assert_eq!(out, "Hi Sam, meet Clip!");
    }

    #[test]
    fn test_render_missing_placeholder() {
        let err = render("Hi {{name}}", &Vars::new()).unwrap_err();
        assert_eq!(err, WorkflowError::MissingPlaceholder("name".to_string()));
    }

    #[test]
    fn test_render_unclosed_braces_kept() {
        let out = render("Set {{name}} and {{oops", &vars(&[("name", "x")])).unwrap();
        assert_eq!(out, "Set x and {{oops");
    }

    #[test]
    fn test_render_no_placeholders() {
        assert_eq!(render("plain text", &Vars::new()).unwrap(), "plain text");
    }

    #[test]
    fn test_placeholders_in_order() {
        assert_eq!(
            placeholders("{{b}} {{a}} {{ b }} {{c"),
            vec!["b".to_string(), "a".to_string()]
        );
    }

    static VARIANTS: &[Variant] = &[
        Variant {
            name: "One",
            sections: &[("line", "one {{x}}")],
        },
        Variant {
            name: "Two",
            sections: &[("line", "two {{x}}")],
        },
    ];

    #[test]
    fn test_pick_rotates_and_validates() {
        let set = TemplateSet::new(VARIANTS, &[], Duration::ZERO);
        let filled = vars(&[("x", "1")]);
        assert_eq!(set.pick(None, &filled).unwrap(), 0);
        assert_eq!(set.pick(None, &filled).unwrap(), 1);
        assert_eq!(set.pick(None, &filled).unwrap(), 0);
        assert_eq!(set.pick(Some(1), &filled).unwrap(), 1);
        assert_eq!(
            set.pick(Some(2), &filled),
            Err(WorkflowError::VariantOutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_pick_keeps_rotation_when_vars_missing() {
        let set = TemplateSet::new(VARIANTS, &[], Duration::ZERO);
        assert_eq!(
            set.pick(None, &Vars::new()),
            Err(WorkflowError::MissingPlaceholder("x".to_string()))
        );
        assert_eq!(set.position(), 0);
        assert_eq!(set.pick(None, &vars(&[("x", "1")])).unwrap(), 0);
        assert_eq!(set.position(), 1);
    }

    #[test]
    fn test_resume_at_wraps() {
        let set = TemplateSet::new(VARIANTS, &[], Duration::ZERO);
        set.resume_at(3);
        assert_eq!(set.position(), 1);
        assert_eq!(set.pick(None, &vars(&[("x", "1")])).unwrap(), 1);
        assert_eq!(set.position(), 0);
    }

    #[test]
    fn test_vars_overlay_defaults() {
        let set = TemplateSet::new(VARIANTS, &[("x", "default"), ("y", "keep")], Duration::ZERO);
        let request = GenerationRequest::new().var("x", "given").var("y", "  ");
        let vars = set.vars(&request);
        assert_eq!(vars["x"], "given");
        assert_eq!(vars["y"], "keep");
    }

    #[tokio::test]
    async fn test_produce_fills_sections() {
        let set = TemplateSet::new(VARIANTS, &[("x", "!")], Duration::ZERO);
        let vars = set.vars(&GenerationRequest::new());
        let content = set.produce("test", 1, &vars).await.unwrap();
        assert_eq!(content.variant_name, "Two");
        assert_eq!(content.section("line"), Some("two !"));
    }

    #[tokio::test]
    async fn test_produce_waits_for_delay() {
        let set = TemplateSet::new(VARIANTS, &[("x", "!")], Duration::from_millis(30));
        let vars = set.vars(&GenerationRequest::new());
        let started = std::time::Instant::now();
        set.produce("test", 0, &vars).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
