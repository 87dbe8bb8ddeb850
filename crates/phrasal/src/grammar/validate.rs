use crate::grammar::{CharClasses, DefinitionPart, GrammarError, Optionality, Rule, RuleId};
use compact_str::CompactString;
use smallvec::SmallVec;

/// Validate a grammar for common issues
///
/// # Errors
///
/// Returns an error if a character range is empty or a rule can instantiate
/// itself before any phrase is consumed.
pub fn validate_grammar(rules: &[Rule], char_classes: &CharClasses) -> Result<(), GrammarError> {
    if let Some(range) = char_classes.all_ranges().find(|range| !range.is_valid()) {
        return Err(GrammarError::InvalidCharRange {
            start: range.start,
            end: range.end,
        });
    }

    if let Some(cycle) = detect_left_recursion(rules) {
        return Err(GrammarError::LeftRecursion(cycle));
    }

    Ok(())
}

/// Rules a phrase may be offered to before anything in `rule` consumed it.
///
/// Parts are tried in order, so every reference list up to and including the
/// first required part can be instantiated by the very first phrase.
fn leading_rules(rule: &Rule) -> SmallVec<[RuleId; 8]> {
    let mut leading = SmallVec::new();
    for part in rule.definition() {
        if let DefinitionPart::Rules(part) = part {
            leading.extend_from_slice(part.candidates());
        }
        if !part.is_optional() {
            break;
        }
    }
    leading
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

fn detect_left_recursion(rules: &[Rule]) -> Option<Vec<CompactString>> {
    let edges: Vec<_> = rules.iter().map(leading_rules).collect();
    let mut marks = vec![Mark::Unvisited; rules.len()];
    let mut stack = Vec::new();

    for root in 0..rules.len() {
        if marks[root] == Mark::Unvisited {
            if let Some(cycle) = visit(root, &edges, &mut marks, &mut stack) {
                return Some(
                    cycle
                        .into_iter()
                        .map(|index| CompactString::from(rules[index].name()))
                        .collect(),
                );
            }
        }
    }
    None
}

fn visit(
    node: usize,
    edges: &[SmallVec<[RuleId; 8]>],
    marks: &mut [Mark],
    stack: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    marks[node] = Mark::OnStack;
    stack.push(node);

    for next in edges[node].iter().map(|id| id.index()) {
        match marks[next] {
            Mark::OnStack => {
                let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                let mut cycle = stack[start..].to_vec();
                cycle.push(next);
                return Some(cycle);
            }
            Mark::Unvisited => {
                if let Some(cycle) = visit(next, edges, marks, stack) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    stack.pop();
    marks[node] = Mark::Done;
    None
}
