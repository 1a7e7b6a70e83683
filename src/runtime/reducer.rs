use crate::runtime::effect::Effect;
use crate::runtime::event::{SystemEvent, WidgetAction};
use crate::runtime::intent::Intent;
use crate::widgets::components::date_picker::DatePicker;
use crate::widgets::traits::{InteractionResult, Interactive};

pub struct Reducer;

impl Reducer {
    pub fn reduce(picker: &mut DatePicker, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Dismiss(reason) => collect_effects(picker.dismiss(reason)),
            Intent::NextFocus => collect_effects(picker.focus_next()),
            Intent::PrevFocus => collect_effects(picker.focus_prev()),
            Intent::InputKey(key) => collect_effects(picker.on_key(key)),
            Intent::Tick => vec![],
        }
    }

    pub fn open(picker: &mut DatePicker) -> Vec<Effect> {
        collect_effects(picker.open())
    }

    pub fn system(picker: &mut DatePicker, event: &SystemEvent) -> Vec<Effect> {
        collect_effects(picker.on_system_event(event))
    }
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result
        .actions
        .into_iter()
        .filter_map(|action| match action {
            WidgetAction::Picker(action) => Some(Effect::Picker(action)),
            WidgetAction::Schedule(command) => Some(Effect::Schedule(command)),
            _ => None,
        })
        .collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerConfig;
    use crate::runtime::event::{CloseReason, PickerAction};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::shared::mode::PickerMode;

    fn picker_actions(effects: &[Effect]) -> Vec<PickerAction> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Picker(action) => Some(action.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn dismiss_cancels_and_requests_render() {
        let mut picker = DatePicker::new(&PickerConfig::default()).expect("picker");
        Reducer::open(&mut picker);
        let effects = Reducer::reduce(&mut picker, Intent::Dismiss(CloseReason::Backdrop));
        assert_eq!(
            picker_actions(&effects),
            vec![
                PickerAction::Cancelled,
                PickerAction::Closed {
                    reason: CloseReason::Backdrop
                },
            ]
        );
        assert!(matches!(effects.last(), Some(Effect::RequestRender)));
    }

    #[test]
    fn hidden_picker_produces_no_effects() {
        let mut picker = DatePicker::new(&PickerConfig::default()).expect("picker");
        assert!(Reducer::reduce(&mut picker, Intent::NextFocus).is_empty());
        let enter = Intent::InputKey(KeyEvent::new(KeyCode::Enter));
        assert!(Reducer::reduce(&mut picker, enter).is_empty());
    }

    #[test]
    fn blur_schedules_surface_as_effects() {
        let mut picker =
            DatePicker::new(&PickerConfig::default().with_mode(PickerMode::Time)).expect("picker");
        Reducer::open(&mut picker);
        Reducer::reduce(&mut picker, Intent::InputKey(KeyEvent::new(KeyCode::Enter)));
        let effects = Reducer::reduce(&mut picker, Intent::NextFocus);
        assert!(effects.iter().any(|effect| matches!(effect, Effect::Schedule(_))));
    }
}
