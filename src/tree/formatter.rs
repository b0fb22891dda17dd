use super::ExampleNode;

const INDENT: &str = "  ";

/// Renders nodes as an indented listing: `- name` for files, `+ name` for
/// directories with their children one level deeper.
pub fn format_tree(nodes: &[ExampleNode]) -> String {
    let mut lines = Vec::new();
    render(nodes, 0, &mut lines);
    lines.join("\n")
}

fn render(nodes: &[ExampleNode], depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    for node in nodes {
        if node.is_file {
            lines.push(format!("{}- {}", indent, node.name));
        } else {
            lines.push(format!("{}+ {}", indent, node.name));
            render(node.children(), depth + 1, lines);
        }
    }
}
