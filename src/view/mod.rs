use maud::{html, Markup, PreEscaped};
use serde::Serialize;

mod page;
mod panel;

pub use self::{page::*, panel::*};

/// Embed data as a JSON script block.
///
/// The JSON text must not be able to close the surrounding script element.
fn json_script<T: Serialize>(id: &str, data: &T) -> serde_json::Result<Markup> {
    let json = serde_json::to_string(data)?.replace("</", "<\\/");
    Ok(html! {
        script id=(id) type="application/json" { (PreEscaped(json)) }
    })
}
