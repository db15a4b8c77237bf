//! Kinds command
//!
//! Lists the built-in resource kinds, or describes the schema of one.

use super::{CommandContext, Runnable};
use anyhow::Result;
use clap::Parser;
use nxconverge::schema::{ApplyOrder, DefaultPolicy, PropertyDef, ResourceKind, SchemaRegistry};
use nxconverge::value::display_slot;
use serde::Serialize;

/// Arguments for the kinds command
#[derive(Parser, Debug, Clone)]
pub struct KindsArgs {
    /// Describe this kind instead of listing all of them
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct KindSummary {
    name: &'static str,
    keys: Vec<&'static str>,
    properties: usize,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct PropertySummary {
    name: &'static str,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'static str>,
    default: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unsupported_on: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GroupSummary {
    name: &'static str,
    setter: &'static str,
    members: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct KindDetail {
    name: &'static str,
    description: &'static str,
    keys: Vec<KeySummary>,
    properties: Vec<PropertySummary>,
    groups: Vec<GroupSummary>,
    rules: Vec<String>,
}

#[derive(Debug, Serialize)]
struct KeySummary {
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'static str>,
}

fn default_label(property: &PropertyDef) -> String {
    match &property.default {
        DefaultPolicy::Literal(value) => display_slot(value.as_ref()),
        DefaultPolicy::Query => "(device)".to_string(),
    }
}

fn rules(kind: &ResourceKind) -> Vec<String> {
    let mut rules = Vec::new();
    for set in &kind.exclusive {
        let mut rule = format!("at most one of {} may be true", set.members.join(", "));
        if set.disable_others {
            rule.push_str("; enabling one disables the others");
        }
        rules.push(rule);
    }
    for requirement in &kind.requirements {
        let mut rule = format!("{} requires {}", requirement.property, requirement.requires);
        if !requirement.unless.is_empty() {
            rule.push_str(&format!(" unless {}", requirement.unless.join(" or ")));
        }
        rules.push(rule);
    }
    if kind.apply_order == ApplyOrder::DisableFirst {
        rules.push("disabling writes are applied before enabling writes".to_string());
    }
    rules
}

fn detail(kind: &ResourceKind) -> KindDetail {
    KindDetail {
        name: kind.name,
        description: kind.description,
        keys: kind
            .keys
            .iter()
            .map(|k| KeySummary {
                name: k.name,
                default: k.default,
            })
            .collect(),
        properties: kind
            .properties()
            .iter()
            .map(|p| PropertySummary {
                name: p.name,
                kind: p.kind.to_string(),
                group: p.group,
                default: default_label(p),
                unsupported_on: p.unsupported_on.iter().map(|pl| pl.to_string()).collect(),
            })
            .collect(),
        groups: kind
            .groups
            .iter()
            .map(|g| GroupSummary {
                name: g.name,
                setter: g.setter,
                members: g.members.clone(),
            })
            .collect(),
        rules: rules(kind),
    }
}

impl KindsArgs {
    /// Execute the kinds command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let registry = SchemaRegistry::builtin();

        let Some(name) = &self.kind else {
            let kinds: Vec<KindSummary> = registry
                .iter()
                .map(|k| KindSummary {
                    name: k.name,
                    keys: k.keys.iter().map(|key| key.name).collect(),
                    properties: k.properties().len(),
                    description: k.description,
                })
                .collect();
            if ctx.output.is_structured() {
                ctx.output.emit(&kinds);
            } else {
                let rows: Vec<Vec<String>> = kinds
                    .iter()
                    .map(|k| {
                        vec![
                            k.name.to_string(),
                            k.keys.join(" "),
                            k.properties.to_string(),
                            k.description.to_string(),
                        ]
                    })
                    .collect();
                ctx.output
                    .table(&["KIND", "KEYS", "PROPERTIES", "DESCRIPTION"], &rows);
            }
            return Ok(0);
        };

        let kind = match registry.get(name) {
            Ok(kind) => kind,
            Err(e) => {
                ctx.output.error(&e.to_string());
                ctx.output
                    .hint(&format!("known kinds: {}", registry.names().join(", ")));
                return Ok(e.exit_code());
            }
        };

        let detail = detail(kind);
        if ctx.output.is_structured() {
            ctx.output.emit(&detail);
            return Ok(0);
        }

        ctx.output.banner(&format!("KIND [{}]", detail.name));
        println!("{}", detail.description);

        let keys: Vec<String> = detail
            .keys
            .iter()
            .map(|k| match k.default {
                Some(default) => format!("{} (default: {})", k.name, default),
                None => k.name.to_string(),
            })
            .collect();
        ctx.output.list("Title pattern", &keys);

        ctx.output.section("Properties");
        let rows: Vec<Vec<String>> = detail
            .properties
            .iter()
            .map(|p| {
                vec![
                    p.name.to_string(),
                    p.kind.clone(),
                    p.group.unwrap_or("").to_string(),
                    p.default.clone(),
                    p.unsupported_on.join(","),
                ]
            })
            .collect();
        ctx.output
            .table(&["NAME", "TYPE", "GROUP", "DEFAULT", "UNSUPPORTED ON"], &rows);

        if !detail.groups.is_empty() {
            let groups: Vec<String> = detail
                .groups
                .iter()
                .map(|g| format!("{}: {}({})", g.name, g.setter, g.members.join(", ")))
                .collect();
            ctx.output.list("Composite setters", &groups);
        }
        if !detail.rules.is_empty() {
            ctx.output.list("Rules", &detail.rules);
        }

        Ok(0)
    }
}

impl Runnable for KindsArgs {
    fn run(&self, ctx: &mut CommandContext) -> Result<i32> {
        self.execute(ctx)
    }
}
