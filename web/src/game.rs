use crate::settings::SizePicker;
use crate::storage::BrowserStore;
use crate::utils::*;
use clap::Args;
use groupgame_core as game;
use game::{Coord, Coord2, GameError, MergeOutcome, SelectOutcome};
use yew::prelude::*;

type Engine = game::GameEngine<BrowserStore>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(Coord2),
    Deselect,
    ShakeEnd(Coord2),
    NewGame,
    ChangeSize(Coord),
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    origin: Coord2,
    display: game::TileDisplay,
    color: Option<game::CategoryColor>,
    #[prop_or_default]
    disabled: bool,
    #[prop_or_default]
    selected: bool,
    #[prop_or_default]
    shaking: bool,
    callback: Callback<Msg>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    use game::TileDisplay::*;

    let TileProps {
        origin,
        display,
        color,
        disabled,
        selected,
        shaking,
        callback,
    } = props.clone();

    let mut class = classes!("tile");
    if selected {
        class.push("selected");
    }
    if shaking {
        class.push("shake");
    }

    let title = display.tooltip().map(AttrValue::from);
    let style = color.map(|color| format!("background: {color}"));

    let content = match &display {
        Single(item) => html! { {item.clone()} },
        Pair(first, second) => html! { <b>{format!("{first}; {second}")}</b> },
        Elided {
            first,
            second,
            count,
            ..
        } => html! {
            <b>
                {format!("{first}, {second}, ... ")}
                <span class="red">{format!("[{count}]")}</span>
            </b>
        },
        Finished { category, .. } => html! { <b>{category.clone()}</b> },
    };

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("{:?} clicked", origin);
            callback.emit(Msg::Select(origin));
        })
    };

    let onanimationend = Callback::from(move |_: AnimationEvent| {
        callback.emit(Msg::ShakeEnd(origin));
    });

    html! {
        <div class="cell">
            <button {class} {title} {style} {disabled} {onclick} {onanimationend}>
                {content}
            </button>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

pub(crate) struct GameView {
    categories: game::Categories,
    engine: Result<Engine, GameError>,
    shaking: Vec<Coord2>,
    celebrating: bool,
    notice: Option<String>,
}

impl GameView {
    fn start(categories: &game::Categories, seed: u64) -> (Result<Engine, GameError>, bool) {
        let store = BrowserStore;
        let config = game::GameConfig::from_settings(&store);
        log::debug!("starting {:?} with seed {}", config, seed);

        match Engine::start(categories, config, store, seed) {
            Ok((engine, outcome)) => {
                log::info!("game started: {:?}", outcome);
                (Ok(engine), outcome.is_won())
            }
            Err(err) => {
                log::error!("could not start game: {}", err);
                (Err(err), false)
            }
        }
    }

    fn restart(&mut self) {
        let (engine, celebrating) = Self::start(&self.categories, js_random_seed());
        self.engine = engine;
        self.celebrating = celebrating;
    }

    /// Deals again after a failed start, without picking up any saved game.
    fn start_over(&mut self) {
        game::Snapshot::discard(&mut BrowserStore);
        self.restart();
    }

    fn select(&mut self, origin: Coord2) -> bool {
        let Ok(engine) = &mut self.engine else {
            return false;
        };

        let outcome = engine.select(origin);
        match outcome {
            SelectOutcome::Merge(MergeOutcome::Mismatch { first, second }) => {
                self.shaking.extend([first, second]);
            }
            SelectOutcome::Merge(MergeOutcome::Won { .. }) => {
                self.celebrating = true;
            }
            _ => {}
        }
        if let Some(game::SaveStatus::Failed) = engine.last_save() {
            self.notice = Some("Progress could not be saved in this browser.".to_string());
        }
        outcome.has_update()
    }

    fn new_game(&mut self) -> bool {
        if !gloo::dialogs::confirm("Start a new game? Current progress will be lost.") {
            return false;
        }
        self.shaking.clear();
        self.celebrating = false;
        self.notice = None;

        let Ok(engine) = &mut self.engine else {
            self.start_over();
            return true;
        };
        if let Err(err) = engine.new_game(&self.categories, js_random_seed()) {
            log::error!("could not deal a new game: {}", err);
            self.engine = Err(err);
        }
        true
    }

    fn change_size(&mut self, size: Coord) -> bool {
        self.shaking.clear();

        let Ok(engine) = &mut self.engine else {
            let mut store = BrowserStore;
            game::Snapshot::discard(&mut store);
            game::GameConfig::save_size(&mut store, size);
            self.restart();
            return true;
        };

        match engine.change_size(&self.categories, size, js_random_seed()) {
            Ok(changed) => {
                if changed {
                    self.celebrating = false;
                    self.notice = None;
                }
                changed
            }
            Err(err) => {
                log::error!("could not change size to {}: {}", size, err);
                self.notice = Some(err.to_string());
                true
            }
        }
    }

    fn view_board(&self, ctx: &Context<Self>, engine: &Engine) -> Html {
        let selected = engine.selection().selected();
        let callback = ctx.link().callback(|msg: Msg| msg);

        html! {
            <div class={classes!("board", engine.is_won().then_some("won"))}>
                {
                    for engine.board().rows().map(|row| html! {
                        <div class="row">
                            {
                                for row.map(|tile| {
                                    let origin = tile.origin();
                                    html! {
                                        <TileView
                                            key={game::origin_key(origin)}
                                            {origin}
                                            display={tile.display().clone()}
                                            color={tile.color()}
                                            disabled={tile.is_disabled()}
                                            selected={selected == Some(origin)}
                                            shaking={self.shaking.contains(&origin)}
                                            callback={callback.clone()}
                                        />
                                    }
                                })
                            }
                        </div>
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let categories = crate::catalog::builtin();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let (engine, celebrating) = Self::start(&categories, seed);

        Self {
            categories,
            engine,
            shaking: Vec::new(),
            celebrating,
            notice: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Select(origin) => self.select(origin),
            Deselect => self
                .engine
                .as_mut()
                .map_or(false, |engine| engine.deselect()),
            ShakeEnd(origin) => {
                let before = self.shaking.len();
                self.shaking.retain(|&pos| pos != origin);
                before != self.shaking.len()
            }
            NewGame => self.new_game(),
            ChangeSize(size) => self.change_size(size),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cb_new_game = ctx.link().callback(|_: MouseEvent| NewGame);
        let cb_deselect = ctx.link().callback(|_: MouseEvent| Deselect);
        let cb_change_size = ctx.link().callback(ChangeSize);

        let (current_size, in_progress) = match &self.engine {
            Ok(engine) => (
                engine.config().num_groups,
                engine.score() > 0 && !engine.is_won(),
            ),
            Err(_) => (
                game::GameConfig::from_settings(&BrowserStore).num_groups,
                false,
            ),
        };

        let body = match &self.engine {
            Ok(engine) => self.view_board(ctx, engine),
            Err(err) => html! {
                <article class="error">
                    <h2>{"Cannot start a game"}</h2>
                    <p>{err.to_string()}</p>
                </article>
            },
        };

        let (score, win_score, mistakes, has_selection) = match &self.engine {
            Ok(engine) => (
                engine.score(),
                engine.config().win_score(),
                engine.mistakes(),
                engine.selection().selected().is_some(),
            ),
            Err(_) => (0, 0, 0, false),
        };

        html! {
            <div class={classes!("groupgame", self.celebrating.then_some("celebrate"))}>
                <nav>
                    <span>{"Score: "}<b id="score">{score.to_string()}</b>{format!(" / {win_score}")}</span>
                    <span>{"Mistakes: "}<b id="mistakes">{mistakes.to_string()}</b></span>
                    <button id="deselect" disabled={!has_selection} onclick={cb_deselect}>{"Deselect"}</button>
                    <button onclick={cb_new_game}>{"New game"}</button>
                    <SizePicker current={current_size} confirm={in_progress} onchange={cb_change_size}/>
                </nav>
                if let Some(notice) = &self.notice {
                    <p class="notice">{notice}</p>
                }
                {body}
                if self.celebrating {
                    <p class="celebration">{"All groups found!"}</p>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Wrapper {
        #[command(flatten)]
        props: GameProps,
    }

    #[test]
    fn seed_can_be_forced_from_hash_args() {
        let args = Wrapper::try_parse_from(["", "--seed=42"]).unwrap();
        assert_eq!(args.props.seed, Some(42));

        let args = Wrapper::try_parse_from([""]).unwrap();
        assert_eq!(args.props.seed, None);
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::*;
        use game::KeyValueStore;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn starting_over_drops_the_saved_game() {
            let categories = crate::catalog::builtin();
            let mut store = BrowserStore;
            game::Snapshot::discard(&mut store);
            game::GameConfig::save_size(&mut store, 3);
            let config = game::GameConfig::square(3).unwrap();
            let (mut saved, _) = Engine::start(&categories, config, store, 1).unwrap();
            saved.save_state();
            assert!(BrowserStore.get(game::SNAPSHOT_KEY).unwrap().is_some());

            let mut view = GameView {
                categories,
                engine: Err(GameError::InvalidConfig),
                shaking: Vec::new(),
                celebrating: false,
                notice: None,
            };
            view.start_over();

            assert!(view.engine.is_ok());
            assert_eq!(BrowserStore.get(game::SNAPSHOT_KEY).unwrap(), None);
        }
    }
}
