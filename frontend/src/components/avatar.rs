use friendboard_shared::avatar::{colors_for, initial};
use leptos::prelude::*;

/// 名字首字母头像，颜色由名字决定
#[component]
pub fn Avatar(
    #[prop(into)] name: String,
    /// 尺寸与字号
    #[prop(default = "h-9 w-9 text-sm")]
    size: &'static str,
) -> impl IntoView {
    let colors = colors_for(&name);
    let letter = initial(&name);
    let class = format!(
        "{size} {} rounded-full ring-2 flex items-center justify-center font-semibold shrink-0",
        colors.class()
    );

    view! { <div class=class>{letter}</div> }
}
