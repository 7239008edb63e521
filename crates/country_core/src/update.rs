use crate::{Effect, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::CountriesChanged(countries) => {
            state.apply_countries(countries);
            Vec::new()
        }
        Msg::Scrolled { offset } => {
            state.apply_scroll(offset);
            Vec::new()
        }
        Msg::ViewDestroyed => {
            state.detach_view();
            Vec::new()
        }
        Msg::ViewCreated => {
            state.attach_view();
            Vec::new()
        }
        Msg::RefreshClicked => vec![Effect::Refresh],
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
    };

    (state, effects)
}
