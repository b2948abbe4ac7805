//! Renders generated style trees as style-sheet text for hover output.

use std::borrow::Cow;

use tailmark_core::StyleNode;

use crate::error::RenderError;

/// Deepest nesting the renderer accepts.
pub const MAX_RENDER_DEPTH: usize = 32;

const INDENT: &str = "  ";

/// Renders `node` and its children, two spaces per nesting level.
///
/// Colour values of the form `rgb(R G B / var(--tw-…-opacity))` gain a
/// trailing `/* #rrggbb */` comment.
///
/// # Errors
///
/// Returns a [`RenderError`] when a node has a blank selector, at-rule name
/// or property, or when the tree nests deeper than [`MAX_RENDER_DEPTH`].
pub fn render(node: &StyleNode) -> Result<String, RenderError> {
    let mut out = String::new();
    write_node(node, 0, &mut out)?;
    Ok(out)
}

fn write_node(node: &StyleNode, depth: usize, out: &mut String) -> Result<(), RenderError> {
    if depth >= MAX_RENDER_DEPTH {
        return Err(RenderError::TooDeep {
            limit: MAX_RENDER_DEPTH,
        });
    }
    let indent = INDENT.repeat(depth);
    match node {
        StyleNode::Rule { selector, children } => {
            if selector.trim().is_empty() {
                return Err(RenderError::EmptySelector);
            }
            out.push_str(&indent);
            out.push_str(selector);
            out.push_str(" {");
            write_block(children, depth, &indent, out)
        }
        StyleNode::AtRule {
            name,
            params,
            children,
        } => {
            if name.trim().is_empty() {
                return Err(RenderError::EmptyAtRuleName);
            }
            out.push_str(&indent);
            out.push('@');
            out.push_str(name);
            if !params.trim().is_empty() {
                out.push(' ');
                out.push_str(params);
            }
            out.push_str(" {");
            write_block(children, depth, &indent, out)
        }
        StyleNode::Declaration { property, value } => {
            if property.trim().is_empty() {
                return Err(RenderError::EmptyProperty);
            }
            out.push_str(&indent);
            out.push_str(property);
            out.push_str(": ");
            out.push_str(&annotate_color(value));
            out.push(';');
            Ok(())
        }
    }
}

fn write_block(
    children: &[StyleNode],
    depth: usize,
    indent: &str,
    out: &mut String,
) -> Result<(), RenderError> {
    for child in children {
        out.push('\n');
        write_node(child, depth + 1, out)?;
    }
    out.push('\n');
    out.push_str(indent);
    out.push('}');
    Ok(())
}

/// Appends a hex comment to opacity-variable `rgb()` values.
///
/// Any other value is returned unchanged.
#[must_use]
pub fn annotate_color(value: &str) -> Cow<'_, str> {
    opacity_rgb(value).map_or(Cow::Borrowed(value), |rgb| {
        Cow::Owned(format!("{value} /* #{rgb:06x} */"))
    })
}

fn opacity_rgb(value: &str) -> Option<u32> {
    let inner = value.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
    let (channels, alpha) = inner.split_once('/')?;
    if !is_opacity_variable(alpha.trim()) {
        return None;
    }
    let mut parts = channels.split_whitespace();
    let red = channel(parts.next()?)?;
    let green = channel(parts.next()?)?;
    let blue = channel(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue))
}

fn channel(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn is_opacity_variable(alpha: &str) -> bool {
    let Some(body) = alpha
        .strip_prefix("var(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return false;
    };
    let name = body.split_once(',').map_or(body, |(name, _)| name).trim();
    name.strip_prefix("--tw-")
        .and_then(|rest| rest.strip_suffix("-opacity"))
        .is_some_and(|middle| !middle.is_empty())
}
