// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use cqlstub::{Action, CqlType};

pub fn match_verdict(matched: bool) -> ColoredString {
    if matched {
        "MATCH".bold().green()
    } else {
        "NO MATCH".bold().red()
    }
}

pub fn action_json(action: &Action) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(action)
}

/// Indented tree of a descriptor, one node per line
pub fn type_tree(ty: &CqlType) -> String {
    let mut out = String::new();
    write_node(&mut out, ty, "", "", "");
    out
}

fn write_node(out: &mut String, ty: &CqlType, label: &str, prefix: &str, child_prefix: &str) {
    let name = match ty {
        CqlType::Primitive(primitive) => primitive.name().cyan().to_string(),
        CqlType::List(_) => "list".to_string(),
        CqlType::Set(_) => "set".to_string(),
        CqlType::Map(_, _) => "map".to_string(),
        CqlType::Tuple(_) => "tuple".to_string(),
    };
    out.push_str(&format!("{}{}{}\n", prefix, label, name));

    let children: Vec<(&str, &CqlType)> = match ty {
        CqlType::Primitive(_) => Vec::new(),
        CqlType::List(element) | CqlType::Set(element) => vec![("", element.as_ref())],
        CqlType::Map(key, value) => vec![("key: ", key.as_ref()), ("value: ", value.as_ref())],
        CqlType::Tuple(elements) => elements.iter().map(|e| ("", e)).collect(),
    };

    let count = children.len();
    for (i, (label, child)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└─ " } else { "├─ " };
        let extension = if last { "   " } else { "│  " };
        write_node(
            out,
            child,
            label,
            &format!("{}{}", child_prefix, branch),
            &format!("{}{}", child_prefix, extension),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tree_layout() {
        colored::control::set_override(false);
        let ty = cqlstub::parse_type("map<text,list<int>>").unwrap();
        assert_eq!(
            type_tree(&ty),
            "map\n├─ key: text\n└─ value: list\n   └─ int\n"
        );
    }
}
