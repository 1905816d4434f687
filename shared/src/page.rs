//! 页面数据状态
//!
//! `Initial -> Loading -> Ready | Failed`，在 `Ready` 上发起的变更进入 `Mutating`，
//! 期间列表保持可见，结束后回到 `Ready`（失败时数据保留，附带错误消息）。
//! 变更可以重叠：`Mutating` 记录尚未返回的请求数，最后一个返回时才离开该状态。

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Initial,
    Loading,
    Ready(T),
    Mutating {
        data: T,
        in_flight: usize,
    },
    Failed {
        message: String,
        data: Option<T>,
    },
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        PageState::Initial
    }
}

impl<T> PageState<T> {
    /// 当前可渲染的数据
    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) | PageState::Mutating { data, .. } => Some(data),
            PageState::Failed { data, .. } => data.as_ref(),
            PageState::Initial | PageState::Loading => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(data) | PageState::Mutating { data, .. } => Some(data),
            PageState::Failed { data, .. } => data.as_mut(),
            PageState::Initial | PageState::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Initial | PageState::Loading)
    }

    pub fn is_mutating(&self) -> bool {
        matches!(self, PageState::Mutating { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn start_loading(&mut self) {
        *self = PageState::Loading;
    }

    /// 首次加载的结果
    pub fn finish_loading(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(data) => PageState::Ready(data),
            Err(message) => PageState::Failed {
                message,
                data: None,
            },
        };
    }

    /// 登记一次变更；没有数据时返回 false（不允许变更）
    pub fn begin_mutation(&mut self) -> bool {
        match std::mem::replace(self, PageState::Initial) {
            PageState::Ready(data)
            | PageState::Failed {
                data: Some(data), ..
            } => {
                *self = PageState::Mutating { data, in_flight: 1 };
                true
            }
            PageState::Mutating { data, in_flight } => {
                *self = PageState::Mutating {
                    data,
                    in_flight: in_flight + 1,
                };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// 一次变更结束：成功时用 `apply` 修改数据，失败时数据原样保留
    ///
    /// 仍有其他请求未返回时保持 `Mutating`。
    pub fn finish_mutation<R>(&mut self, result: Result<R, String>, apply: impl FnOnce(&mut T, R)) {
        let (mut data, remaining) = match std::mem::replace(self, PageState::Initial) {
            PageState::Mutating { data, in_flight } => (data, in_flight.saturating_sub(1)),
            PageState::Ready(data)
            | PageState::Failed {
                data: Some(data), ..
            } => (data, 0),
            other => {
                *self = other;
                return;
            }
        };
        let error = match result {
            Ok(value) => {
                apply(&mut data, value);
                None
            }
            Err(message) => Some(message),
        };
        *self = match (remaining, error) {
            (0, None) => PageState::Ready(data),
            (0, Some(message)) => PageState::Failed {
                message,
                data: Some(data),
            },
            (in_flight, _) => PageState::Mutating { data, in_flight },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_then_ready() {
        let mut state: PageState<Vec<u32>> = PageState::default();
        assert!(state.is_loading());
        state.start_loading();
        state.finish_loading(Ok(vec![1, 2]));
        assert_eq!(state.data(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_load_failure_has_no_data() {
        let mut state: PageState<Vec<u32>> = PageState::Loading;
        state.finish_loading(Err("Failed to load jobs".to_string()));
        assert_eq!(state.error(), Some("Failed to load jobs"));
        assert!(state.data().is_none());
    }

    #[test]
    fn test_mutation_keeps_list_visible() {
        let mut state = PageState::Ready(vec![1, 2, 3]);
        assert!(state.begin_mutation());
        assert!(state.is_mutating());
        assert_eq!(state.data().map(Vec::len), Some(3));
        state.finish_mutation(Ok(2), |list, id| list.retain(|x| *x != id));
        assert_eq!(state, PageState::Ready(vec![1, 3]));
    }

    #[test]
    fn test_failed_mutation_leaves_data_unchanged() {
        let mut state = PageState::Ready(vec![1, 2, 3]);
        state.begin_mutation();
        state.finish_mutation(Err::<u32, _>("Failed to delete job".to_string()), |list, id| {
            list.retain(|x| *x != id)
        });
        assert_eq!(state.data().map(Vec::len), Some(3));
        assert_eq!(state.error(), Some("Failed to delete job"));
        // 失败后仍可再次变更
        assert!(state.begin_mutation());
    }

    #[test]
    fn test_overlapping_mutations_both_apply() {
        let mut state = PageState::Ready(vec![1, 2, 3]);
        assert!(state.begin_mutation());
        assert!(state.begin_mutation());
        let remove = |list: &mut Vec<u32>, id: u32| list.retain(|x| *x != id);

        state.finish_mutation(Ok(1), remove);
        assert!(state.is_mutating());
        assert_eq!(state.data(), Some(&vec![2, 3]));

        state.finish_mutation(Ok(3), remove);
        assert_eq!(state, PageState::Ready(vec![2]));
    }

    #[test]
    fn test_overlapping_failure_reported_by_last_result_only() {
        let mut state = PageState::Ready(vec![1, 2, 3]);
        state.begin_mutation();
        state.begin_mutation();
        state.finish_mutation(Err::<u32, _>("Failed to delete job".to_string()), |_, _| {});
        assert!(state.is_mutating());
        state.finish_mutation(Ok(2), |list: &mut Vec<u32>, id| list.retain(|x| *x != id));
        assert_eq!(state, PageState::Ready(vec![1, 3]));
    }

    #[test]
    fn test_cannot_mutate_without_data() {
        let mut state: PageState<Vec<u32>> = PageState::Failed {
            message: "Failed to load".to_string(),
            data: None,
        };
        assert!(!state.begin_mutation());
        assert_eq!(state.error(), Some("Failed to load"));
    }

    #[test]
    fn test_cannot_mutate_while_loading() {
        let mut state: PageState<Vec<u32>> = PageState::Loading;
        assert!(!state.begin_mutation());
        assert!(state.is_loading());
    }
}
