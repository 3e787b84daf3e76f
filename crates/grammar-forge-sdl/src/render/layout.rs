/// One rendered child of a sequence.
#[derive(Debug)]
pub(crate) struct Part {
    pub text: String,
    /// Descriptions are followed by a line break in pretty mode.
    pub is_description: bool,
}

/// Whitespace policy shared by the renderer and the stub writer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub pretty: bool,
    pub indent: usize,
}

impl Layout {
    /// Joins the rendered children of a sequence.
    ///
    /// In pretty mode, children between a `{` and the matching last `}`
    /// are laid out one per indented line.
    pub fn sequence(&self, parts: &[Part]) -> String {
        if !self.pretty {
            return parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }

        let open = parts.iter().position(|p| p.text == "{");
        let close = parts.iter().rposition(|p| p.text == "}");
        match (open, close) {
            (Some(open), Some(close)) if close > open => {
                let head = self.inline(&parts[..open]);
                let body: Vec<&str> = parts[open + 1..close]
                    .iter()
                    .flat_map(|p| p.text.lines())
                    .collect();
                let mut out = self.block(&head, &body);
                let tail = self.inline(&parts[close + 1..]);
                if !tail.is_empty() {
                    out.push(' ');
                    out.push_str(&tail);
                }
                out
            }
            _ => self.inline(parts),
        }
    }

    /// `head { line line }`, one line per row when pretty.
    pub fn block<S: AsRef<str>>(&self, head: &str, lines: &[S]) -> String {
        let mut out = String::new();
        if !head.is_empty() {
            out.push_str(head);
            out.push(' ');
        }
        if !self.pretty {
            out.push('{');
            for line in lines {
                out.push(' ');
                out.push_str(line.as_ref());
            }
            out.push_str(" }");
            return out;
        }
        if lines.is_empty() {
            out.push_str("{}");
            return out;
        }
        out.push_str("{\n");
        for line in lines {
            let line = line.as_ref();
            if !line.is_empty() {
                out.push_str(&" ".repeat(self.indent));
                out.push_str(line);
            }
            out.push('\n');
        }
        out.push('}');
        out
    }

    /// Joins independent items: one per line when pretty.
    pub fn lines(&self, items: &[String]) -> String {
        let separator = if self.pretty { "\n" } else { " " };
        items
            .iter()
            .filter(|item| !item.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Joins top-level blocks.
    pub fn document(&self, blocks: &[String]) -> String {
        let separator = if self.pretty { "\n\n" } else { " " };
        blocks
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn inline(&self, parts: &[Part]) -> String {
        let mut out = String::new();
        let mut after_description = false;
        for part in parts {
            if !out.is_empty() {
                if after_description {
                    out.push('\n');
                } else if needs_space(&out, &part.text) {
                    out.push(' ');
                }
            }
            out.push_str(&part.text);
            after_description = part.is_description;
        }
        out
    }
}

fn needs_space(left: &str, right: &str) -> bool {
    let glues_left = right
        .chars()
        .next()
        .is_some_and(|c| matches!(c, '!' | ':' | ')' | ']' | ',' | '('));
    let glues_right = left
        .chars()
        .last()
        .is_some_and(|c| matches!(c, '(' | '[' | '@'));
    !(glues_left || glues_right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(text: &str) -> Part {
        Part {
            text: text.to_string(),
            is_description: false,
        }
    }

    const PRETTY: Layout = Layout {
        pretty: true,
        indent: 2,
    };
    const COMPACT: Layout = Layout {
        pretty: false,
        indent: 2,
    };

    #[test]
    fn inline_spacing() {
        let parts = [
            part("exampleField"),
            part("("),
            part("arg"),
            part(":"),
            part("["),
            part("String"),
            part("!"),
            part("]"),
            part(")"),
            part(":"),
            part("Int"),
            part("@"),
            part("example"),
        ];
        assert_eq!(
            PRETTY.sequence(&parts),
            "exampleField(arg: [String!]): Int @example"
        );
    }

    #[test]
    fn block_layout() {
        let parts = [
            part("type"),
            part("Query"),
            part("{"),
            part("a: Int\nb: Int"),
            part("}"),
        ];
        assert_eq!(PRETTY.sequence(&parts), "type Query {\n  a: Int\n  b: Int\n}");
        assert_eq!(COMPACT.sequence(&parts), "type Query { a: Int\nb: Int }");
    }

    #[test]
    fn description_breaks_line() {
        let parts = [
            Part {
                text: "\"Example description\"".into(),
                is_description: true,
            },
            part("scalar"),
            part("ExampleScalar"),
        ];
        assert_eq!(
            PRETTY.sequence(&parts),
            "\"Example description\"\nscalar ExampleScalar"
        );
        assert_eq!(
            COMPACT.sequence(&parts),
            "\"Example description\" scalar ExampleScalar"
        );
    }

    #[test]
    fn nested_blocks_indent_again() {
        let inner = PRETTY.block("inner", &["x: Int"]);
        let outer = PRETTY.block("outer", &inner.lines().collect::<Vec<_>>());
        assert_eq!(outer, "outer {\n  inner {\n    x: Int\n  }\n}");
    }

    #[test]
    fn document_separators() {
        let blocks = vec!["a".to_string(), " ".to_string(), "b".to_string()];
        assert_eq!(PRETTY.document(&blocks), "a\n\nb");
        assert_eq!(COMPACT.document(&blocks), "a b");
    }
}
