//! 排行榜：前三名上领奖台，其余名次从第 4 名开始列出

use crate::auth::use_auth;
use crate::components::avatar::Avatar;
use crate::components::icons::{Award, Crown, Flame, Medal, Trophy};
use crate::components::toast::use_toast;
use crate::loader::load_page;
use friendboard_shared::avatar::{colors_for, initial};
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::RankingsRequest;
use friendboard_shared::{PODIUM_DISPLAY_ORDER, RankingEntry, split_podium};
use leptos::prelude::*;

#[derive(Clone, Copy)]
enum PodiumIcon {
    Crown,
    Medal,
    Award,
}

/// 领奖台某一名次的样式
struct PodiumStyle {
    label: &'static str,
    ring: &'static str,
    badge: &'static str,
    size: &'static str,
    icon: PodiumIcon,
}

const PODIUM: [PodiumStyle; 3] = [
    PodiumStyle {
        label: "1st",
        ring: "ring-amber-400/50",
        badge: "bg-amber-500/10 border-amber-400/30",
        size: "h-24 w-24 text-3xl",
        icon: PodiumIcon::Crown,
    },
    PodiumStyle {
        label: "2nd",
        ring: "ring-slate-400/50",
        badge: "bg-slate-400/10 border-slate-400/30",
        size: "h-20 w-20 text-2xl",
        icon: PodiumIcon::Medal,
    },
    PodiumStyle {
        label: "3rd",
        ring: "ring-amber-600/50",
        badge: "bg-amber-700/10 border-amber-700/30",
        size: "h-[4.5rem] w-[4.5rem] text-xl",
        icon: PodiumIcon::Award,
    },
];

impl PodiumIcon {
    fn view(self) -> AnyView {
        let class = "h-6 w-6 text-amber-500 drop-shadow";
        match self {
            PodiumIcon::Crown => view! { <Crown attr:class=class /> }.into_any(),
            PodiumIcon::Medal => view! { <Medal attr:class=class /> }.into_any(),
            PodiumIcon::Award => view! { <Award attr:class=class /> }.into_any(),
        }
    }
}

/// 按展示顺序（2、1、3）排列的领奖台名次；不足三人时对应位置为 `None`
fn podium_slots(podium: &[RankingEntry]) -> [(usize, Option<&RankingEntry>); 3] {
    PODIUM_DISPLAY_ORDER.map(|idx| (idx, podium.get(idx)))
}

#[component]
pub fn RankingsPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let state = RwSignal::new(PageState::<Vec<RankingEntry>>::default());

    load_page(auth, toast, state, RankingsRequest, "Failed to load rankings");

    let me = auth.user_untracked().map(|u| u.id).unwrap_or_default();

    let content = move || {
        let entries = state.with(|s| s.data().cloned().unwrap_or_default());
        if entries.is_empty() {
            return view! {
                <div class="flex flex-col items-center justify-center py-20 text-center">
                    <div class="h-16 w-16 rounded-2xl bg-base-300 flex items-center justify-center mb-4">
                        <Trophy attr:class="h-8 w-8 opacity-50" />
                    </div>
                    <h3 class="text-lg font-semibold">"No rankings yet"</h3>
                    <p class="text-base-content/60 text-sm mt-1">"Post jobs to climb the leaderboard!"</p>
                </div>
            }
            .into_any();
        }

        let (podium, rest) = split_podium(&entries);
        let podium_view = podium_slots(podium)
            .into_iter()
            .map(|(idx, entry)| match entry {
                Some(entry) => podium_slot(entry, &PODIUM[idx]),
                None => view! { <div class="w-28"></div> }.into_any(),
            })
            .collect_view();
        let rest_view = rest
            .iter()
            .enumerate()
            .map(|(i, entry)| ranking_row(entry, i + 4, entry.user_id == me))
            .collect_view();

        view! {
            <div class="flex items-end justify-center gap-4 sm:gap-8 pt-8 pb-4">{podium_view}</div>
            <div class="space-y-2">{rest_view}</div>
        }
        .into_any()
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold tracking-tight">"Leaderboard"</h1>
                <p class="text-base-content/60 mt-1">"See who's sharing the most opportunities"</p>
            </div>
            {move || {
                if state.with(PageState::is_loading) {
                    view! {
                        <div class="flex items-center justify-center py-20">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any()
                } else {
                    content()
                }
            }}
        </div>
    }
}

fn podium_slot(entry: &RankingEntry, style: &PodiumStyle) -> AnyView {
    let colors = colors_for(&entry.name);
    let avatar_class = format!(
        "relative {} rounded-full bg-gradient-to-br {} flex items-center justify-center ring-4 {} mb-3",
        style.size, colors.gradient, style.ring
    );
    let badge_class = format!(
        "mt-2 px-3 py-0.5 rounded-full text-xs font-medium border {}",
        style.badge
    );
    let letter = initial(&entry.name);

    view! {
        <div class="flex flex-col items-center">
            <div class=avatar_class>
                <span class="font-bold text-white">{letter}</span>
                <div class="absolute -top-2 -right-1">{style.icon.view()}</div>
            </div>
            <p class="font-semibold text-sm text-center">{entry.name.clone()}</p>
            <div class="flex items-center gap-1 mt-1">
                <Flame attr:class="h-3.5 w-3.5 text-primary" />
                <span class="text-sm font-bold text-primary">{entry.job_count}</span>
                <span class="text-xs text-base-content/60">"posts"</span>
            </div>
            <span class=badge_class>{style.label}</span>
        </div>
    }
    .into_any()
}

fn ranking_row(entry: &RankingEntry, rank: usize, is_me: bool) -> impl IntoView {
    let class = if is_me {
        "card bg-primary/5 border border-primary/40 transition-all"
    } else {
        "card bg-base-100 border border-base-300 hover:border-primary/30 transition-all"
    };

    view! {
        <div class=class>
            <div class="card-body flex-row items-center gap-4 p-4">
                <div class="h-10 w-10 rounded-full bg-base-300 flex items-center justify-center text-sm font-bold text-base-content/60">
                    {format!("#{rank}")}
                </div>
                <Avatar name=entry.name.clone() size="h-10 w-10 text-sm" />
                <div class="flex-1">
                    <p class="font-medium text-sm">
                        {entry.name.clone()}
                        {is_me.then(|| view! { <span class="text-xs text-primary ml-2">"(you)"</span> })}
                    </p>
                </div>
                <div class="flex items-center gap-1.5">
                    <Flame attr:class="h-4 w-4 text-primary" />
                    <span class="text-lg font-bold">{entry.job_count}</span>
                    <span class="text-xs text-base-content/60">"posts"</span>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, count: u64) -> RankingEntry {
        RankingEntry {
            user_id: name.to_lowercase(),
            name: name.to_string(),
            email: String::new(),
            job_count: count,
        }
    }

    #[test]
    fn test_podium_shows_second_first_third() {
        let entries = vec![entry("Ana", 9), entry("Ben", 5), entry("Cid", 2), entry("Dee", 1)];
        let (podium, rest) = split_podium(&entries);
        let labels: Vec<_> = podium_slots(podium)
            .iter()
            .map(|(idx, e)| (PODIUM[*idx].label, e.map(|e| e.name.as_str())))
            .collect();
        assert_eq!(
            labels,
            vec![("2nd", Some("Ben")), ("1st", Some("Ana")), ("3rd", Some("Cid"))]
        );
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_podium_leaves_gaps_with_fewer_than_three() {
        let entries = vec![entry("Ana", 3)];
        let (podium, _) = split_podium(&entries);
        let slots = podium_slots(podium);
        assert!(slots[0].1.is_none());
        assert_eq!(slots[1].1.map(|e| e.name.as_str()), Some("Ana"));
        assert!(slots[2].1.is_none());
    }
}
