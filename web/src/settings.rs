use groupgame_core::Coord;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Board sizes offered in the picker, all of which the built-in catalog can fill.
pub(crate) const SIZE_CHOICES: &[Coord] = &[2, 3, 4, 5, 6, 7, 8];

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct SizePickerProps {
    pub current: Coord,
    /// Ask before switching, as the current game will be thrown away.
    #[prop_or_default]
    pub confirm: bool,
    pub onchange: Callback<Coord>,
}

#[function_component(SizePicker)]
pub(crate) fn size_picker(props: &SizePickerProps) -> Html {
    let SizePickerProps {
        current,
        confirm,
        onchange,
    } = props.clone();

    let onchange = Callback::from(move |e: Event| {
        let Some(select) = e
            .target()
            .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        let size = match select.value().parse::<Coord>() {
            Ok(size) if size != current => size,
            Ok(_) => return,
            Err(err) => {
                log::warn!("unexpected size {:?}: {}", select.value(), err);
                return;
            }
        };
        if confirm && !gloo::dialogs::confirm("Change size? Current progress will be lost.") {
            select.set_value(&current.to_string());
            return;
        }
        onchange.emit(size);
    });

    html! {
        <label>
            {"Size "}
            <select id="gameSize" {onchange}>
                {
                    for SIZE_CHOICES.iter().map(|&size| html! {
                        <option value={size.to_string()} selected={size == current}>
                            {format!("{size}×{size}")}
                        </option>
                    })
                }
            </select>
        </label>
    }
}
