use std::collections::VecDeque;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GestureLogProps {
    pub events: VecDeque<String>,
}

#[function_component]
pub fn GestureLog(props: &GestureLogProps) -> Html {
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; margin:12px; font-size:13px; font-family:monospace;">
            <div style="font-weight:600; margin-bottom:6px;">{"Gestures"}</div>
            if props.events.is_empty() {
                <div style="color:#8b949e;">{"Swipe the slides, tap, or pinch."}</div>
            }
            { for props.events.iter().map(|e| html! { <div>{ e.clone() }</div> }) }
        </div>
    }
}
