use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};
use yew::prelude::*;

use super::hud::Hud;
use super::message_overlay::MessageOverlay;
use super::touch_controls::TouchControls;
use crate::error::PlatformError;
use crate::game::{Command, Control, Cue, FrameClock, Phase, SeededRng, Session, Viewport};
use crate::platform::{self, Beeper, storage};
use crate::render;

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub sound: bool,
    pub on_toggle_sound: Callback<()>,
}

/// What the DOM overlays show; only pushed to yew when it changes.
#[derive(Clone, Debug, PartialEq)]
struct HudSnapshot {
    score: u64,
    high: u64,
    phase: Phase,
    message: Option<String>,
}

impl HudSnapshot {
    fn of(session: &Session) -> Self {
        Self {
            score: session.display_score(),
            high: session.high_score,
            phase: session.phase,
            message: session.message(),
        }
    }
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, PlatformError> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(PlatformError::NoCanvasContext)
}

fn play_cues(beeper: &Beeper, sound: bool, cues: Vec<Cue>) {
    if !sound {
        return;
    }
    for cue in cues {
        beeper.play(cue);
    }
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(|| {
        Session::new(
            Viewport::default(),
            storage::open_default(),
            Box::new(SeededRng::new(platform::entropy_seed())),
        )
    });
    let hud = {
        let session = session.clone();
        use_state_eq(move || HudSnapshot::of(&session.borrow()))
    };
    let sound_flag = use_mut_ref(|| props.sound);
    // Set by the mount effect; buttons route through it.
    let command_ref = use_mut_ref(|| None::<Rc<dyn Fn(Command)>>);

    {
        let sound_flag = sound_flag.clone();
        use_effect_with(props.sound, move |sound| {
            *sound_flag.borrow_mut() = *sound;
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        let hud = hud.clone();
        let command_ref = command_ref.clone();
        let sound_flag = sound_flag.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let Some(window) = web_sys::window() else {
                tracing::error!(err = %PlatformError::NoWindow, "cannot start");
                return Box::new(|| ());
            };
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return Box::new(|| ());
            };
            let ctx = match context_2d(&canvas) {
                Ok(ctx) => ctx,
                Err(err) => {
                    tracing::error!(%err, "cannot draw");
                    return Box::new(|| ());
                }
            };
            let beeper = Rc::new(Beeper::new());
            let clock = Rc::new(RefCell::new(FrameClock::default()));
            let raf_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));

            let redraw: Rc<dyn Fn()> = {
                let ctx = ctx.clone();
                let session = session.clone();
                let window = window.clone();
                Rc::new(move || render::draw(&ctx, &session.borrow(), now_ms(&window)))
            };
            let publish: Rc<dyn Fn()> = {
                let session = session.clone();
                let hud = hud.clone();
                Rc::new(move || hud.set(HudSnapshot::of(&session.borrow())))
            };

            // Canvas backing store follows CSS size * devicePixelRatio.
            let resize: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let ctx = ctx.clone();
                let session = session.clone();
                let window = window.clone();
                let redraw = redraw.clone();
                Rc::new(move || {
                    let rect = canvas.get_bounding_client_rect();
                    let dpr = window.device_pixel_ratio().max(1.0);
                    canvas.set_width((rect.width() * dpr).floor().max(0.0) as u32);
                    canvas.set_height((rect.height() * dpr).floor().max(0.0) as u32);
                    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
                    session
                        .borrow_mut()
                        .resize(Viewport::new(rect.width(), rect.height()));
                    redraw();
                })
            };
            resize();

            // Frame loop: only scheduled while the run is live.
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            let request_frame: Rc<dyn Fn()> = {
                let window = window.clone();
                let frame_cell = frame_cell.clone();
                let raf_id = raf_id.clone();
                Rc::new(move || {
                    if let Some(cb) = frame_cell.borrow().as_ref() {
                        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id.borrow_mut() = Some(id);
                        }
                    }
                })
            };
            {
                let session = session.clone();
                let clock = clock.clone();
                let raf_id = raf_id.clone();
                let beeper = beeper.clone();
                let sound_flag = sound_flag.clone();
                let redraw = redraw.clone();
                let publish = publish.clone();
                let request_frame = request_frame.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                    *raf_id.borrow_mut() = None;
                    let (cues, still_running) = {
                        let mut s = session.borrow_mut();
                        if !s.is_running() {
                            return;
                        }
                        let dt = clock.borrow_mut().tick(ts);
                        s.step(dt);
                        (s.take_cues(), s.is_running())
                    };
                    play_cues(&beeper, *sound_flag.borrow(), cues);
                    redraw();
                    publish();
                    if still_running {
                        request_frame();
                    }
                }) as Box<dyn FnMut(f64)>));
            }

            // Re-anchors the clock so the first step after a pause is small.
            let resume: Rc<dyn Fn()> = {
                let session = session.clone();
                let clock = clock.clone();
                let raf_id = raf_id.clone();
                let window = window.clone();
                let request_frame = request_frame.clone();
                Rc::new(move || {
                    if !session.borrow().is_running() || raf_id.borrow().is_some() {
                        return;
                    }
                    clock.borrow_mut().anchor(now_ms(&window));
                    request_frame();
                })
            };
            let halt: Rc<dyn Fn()> = {
                let raf_id = raf_id.clone();
                let window = window.clone();
                Rc::new(move || {
                    if let Some(id) = raf_id.borrow_mut().take() {
                        let _ = window.cancel_animation_frame(id);
                    }
                })
            };

            let apply: Rc<dyn Fn(Command)> = {
                let session = session.clone();
                let beeper = beeper.clone();
                let sound_flag = sound_flag.clone();
                let redraw = redraw.clone();
                let publish = publish.clone();
                let resume = resume.clone();
                let halt = halt.clone();
                Rc::new(move |command: Command| {
                    if command.wakes_audio() {
                        beeper.wake();
                    }
                    let (cues, running) = {
                        let mut s = session.borrow_mut();
                        match command {
                            Command::Start => {
                                s.start();
                            }
                            Command::TogglePause => s.toggle_pause(),
                            Command::Restart => s.restart(),
                        }
                        (s.take_cues(), s.is_running())
                    };
                    play_cues(&beeper, *sound_flag.borrow(), cues);
                    if running {
                        resume();
                    } else {
                        halt();
                    }
                    redraw();
                    publish();
                })
            };
            *command_ref.borrow_mut() = Some(apply.clone());

            let keydown_cb = {
                let session = session.clone();
                let apply = apply.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let code = e.code();
                    if Control::from_code(&code).is_some_and(Control::is_gameplay) {
                        e.prevent_default();
                    }
                    let command = {
                        let mut s = session.borrow_mut();
                        let phase = s.phase;
                        s.input.key_down(&code, phase)
                    };
                    if let Some(command) = command {
                        apply(command);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let keyup_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    session.borrow_mut().input.key_up(&e.code());
                }) as Box<dyn FnMut(_)>)
            };
            let resize_cb = {
                let resize = resize.clone();
                Closure::wrap(Box::new(move || resize()) as Box<dyn FnMut()>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("keyup", keyup_cb.as_ref().unchecked_ref())
                .ok();
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            publish();

            Box::new(move || {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window
                    .remove_event_listener_with_callback("keyup", keyup_cb.as_ref().unchecked_ref());
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                halt();
                // The frame closure holds handles to itself via request_frame.
                frame_cell.borrow_mut().take();
                command_ref.borrow_mut().take();
                drop(keydown_cb);
                drop(keyup_cb);
                drop(resize_cb);
            })
        });
    }

    let send = {
        let command_ref = command_ref.clone();
        move |command: Command| {
            let command_ref = command_ref.clone();
            Callback::from(move |_: ()| {
                let apply = command_ref.borrow().clone();
                if let Some(apply) = apply {
                    apply(command);
                }
            })
        }
    };
    let on_press = {
        let session = session.clone();
        Callback::from(move |control: Control| session.borrow_mut().input.press(control))
    };
    let on_release = {
        let session = session.clone();
        Callback::from(move |control: Control| session.borrow_mut().input.release(control))
    };
    let on_share = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            let text = session.borrow().share_text();
            if let Err(err) = platform::share::share_score(&text) {
                tracing::warn!(%err, "could not share score");
            }
        })
    };

    let pause_label = if hud.phase == Phase::Paused { "Resume" } else { "Pause" };

    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#eaf6ff; font-family:system-ui, sans-serif;">
        <canvas ref={canvas_ref.clone()} id="game" style="display:block; width:100%; height:100%; touch-action:none;"></canvas>
        <Hud
            score={hud.score}
            high={hud.high}
            pause_label={pause_label.to_string()}
            sound={props.sound}
            on_toggle_pause={send(Command::TogglePause)}
            on_restart={send(Command::Restart)}
            on_toggle_sound={props.on_toggle_sound.clone()}
        />
        <MessageOverlay
            message={hud.message.clone()}
            phase={hud.phase}
            on_play={send(Command::Start)}
            on_share={on_share}
        />
        <TouchControls on_press={on_press} on_release={on_release} />
    </div>}
}
