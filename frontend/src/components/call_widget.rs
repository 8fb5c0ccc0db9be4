use gloo_timers::callback::Timeout;
use log::{info, warn};
use web_sys::{AbortController, HtmlInputElement};
use yew::prelude::*;

use crate::call::dispatch::request_call;
use crate::call::error::CallError;
use crate::call::state::{CallRequest, Settled, SubmissionState};
use crate::config::WidgetConfig;

#[derive(Properties, PartialEq)]
pub struct CallWidgetProps {
    #[prop_or_default]
    pub config: WidgetConfig,
}

pub enum CallWidgetMsg {
    Open,
    Close,
    SetPhone(String),
    Submit,
    Resolved { attempt: u64, outcome: Result<(), CallError> },
    ResetElapsed { attempt: u64 },
}

pub struct CallWidget {
    request: CallRequest,
    // Dropping the handle cancels the pending reset.
    reset_timer: Option<Timeout>,
    in_flight: Option<AbortController>,
}

impl Component for CallWidget {
    type Message = CallWidgetMsg;
    type Properties = CallWidgetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            request: CallRequest::new(),
            reset_timer: None,
            in_flight: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CallWidgetMsg::Open => {
                self.request.open();
                true
            }
            CallWidgetMsg::Close => {
                self.reset_timer = None;
                self.request.close();
                true
            }
            CallWidgetMsg::SetPhone(value) => {
                self.request.set_phone_input(value);
                true
            }
            CallWidgetMsg::Submit => {
                let Some(submission) = self.request.submit() else {
                    return false;
                };
                self.reset_timer = None;

                let controller = match AbortController::new() {
                    Ok(controller) => Some(controller),
                    Err(e) => {
                        warn!("AbortController unavailable, request cannot be cancelled: {:?}", e);
                        None
                    }
                };
                self.in_flight = controller.clone();

                let config = &ctx.props().config;
                let url = config.webhook_url.clone();
                let timeout_ms = config.request_timeout_ms;
                let attempt = submission.attempt;
                ctx.link().send_future(async move {
                    let outcome = request_call(url, submission.phone, timeout_ms, controller).await;
                    CallWidgetMsg::Resolved { attempt, outcome }
                });
                true
            }
            CallWidgetMsg::Resolved { attempt, outcome } => {
                if attempt == self.request.attempt() {
                    self.in_flight = None;
                }
                if let Err(err) = &outcome {
                    warn!("Call request #{} failed (status {:?}): {}", attempt, err.status(), err);
                }

                let Some(settled) = self.request.resolve(attempt, outcome) else {
                    return true;
                };

                let config = &ctx.props().config;
                let delay = match settled {
                    Settled::Succeeded => config.success_reset_ms,
                    Settled::Failed => config.error_reset_ms,
                };
                let link = ctx.link().clone();
                self.reset_timer = Some(Timeout::new(delay, move || {
                    link.send_message(CallWidgetMsg::ResetElapsed { attempt });
                }));
                true
            }
            CallWidgetMsg::ResetElapsed { attempt } => {
                self.reset_timer = None;
                self.request.reset(attempt)
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.reset_timer = None;
        if let Some(controller) = self.in_flight.take() {
            info!("Widget unmounted, aborting call request #{}", self.request.attempt());
            controller.abort();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="kg-call-widget">
                <style>{ WIDGET_STYLES }</style>
                if self.request.is_open() {
                    <div class="kg-card">
                        if *self.request.state() == SubmissionState::Success {
                            { self.render_success() }
                        } else {
                            { self.render_form(ctx) }
                        }
                    </div>
                } else {
                    <button
                        class="kg-trigger"
                        aria-label="Request a call"
                        onclick={ctx.link().callback(|_| CallWidgetMsg::Open)}
                    >
                        <span class="kg-pulse"></span>
                        <span class="kg-trigger-icon">{ "📞" }</span>
                    </button>
                }
            </div>
        }
    }
}

impl CallWidget {
    fn render_success(&self) -> Html {
        html! {
            <div class="kg-success">
                <div class="kg-success-icon">{ "📞" }</div>
                <h3>{ "Calling..." }</h3>
                <p>{ "Watch your phone! 📱" }</p>
            </div>
        }
    }

    fn render_form(&self, ctx: &Context<Self>) -> Html {
        let state = self.request.state();
        let is_loading = *state == SubmissionState::Loading;
        let is_error = state.error_message().is_some();

        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            CallWidgetMsg::SetPhone(input.value())
        });
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            CallWidgetMsg::Submit
        });

        html! {
            <div class="kg-form-view">
                <button
                    class="kg-close"
                    aria-label="Close"
                    onclick={ctx.link().callback(|_| CallWidgetMsg::Close)}
                >
                    { "✕" }
                </button>

                <div class="kg-header">
                    <div class="kg-avatar">{ "🤖" }</div>
                    <div>
                        <h3>
                            { "Talk to Sarah" }
                            <span class="kg-live-dot"></span>
                        </h3>
                        <p class="kg-badge">{ "AI AGENT ACTIVE" }</p>
                    </div>
                </div>

                <p class="kg-pitch">
                    { "Experience K&G speed. Enter your number for an instant demo." }
                </p>

                <form {onsubmit}>
                    <div class={classes!("kg-field", is_error.then(|| "kg-shake"))}>
                        <input
                            type="tel"
                            class={classes!("kg-input", is_error.then(|| "kg-input-error"))}
                            placeholder="0412 345 678"
                            value={self.request.phone_input().to_string()}
                            {oninput}
                            required={true}
                        />
                        if let Some(message) = state.error_message() {
                            <div class="kg-error">{ format!("Server Error: {}", message) }</div>
                        }
                    </div>

                    <button type="submit" class="kg-submit" disabled={is_loading}>
                        if is_loading {
                            <span class="kg-spinner"></span>
                        } else {
                            { "Call My Phone Now ⚡" }
                        }
                    </button>
                </form>
            </div>
        }
    }
}

const WIDGET_STYLES: &str = r#"
.kg-call-widget {
    position: fixed;
    bottom: 1.5rem;
    right: 1.5rem;
    z-index: 50;
    color: #fff;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
}
.kg-trigger {
    position: relative;
    display: flex;
    align-items: center;
    justify-content: center;
    width: 56px;
    height: 56px;
    border: none;
    border-radius: 50%;
    background: linear-gradient(to right, #00cc66, #00ff88);
    box-shadow: 0 10px 15px rgba(0, 255, 136, 0.5);
    cursor: pointer;
    transition: transform 0.3s ease, box-shadow 0.3s ease;
}
.kg-trigger:hover {
    transform: scale(1.1);
    box-shadow: 0 10px 20px rgba(0, 255, 136, 0.8);
}
.kg-trigger-icon {
    font-size: 1.5rem;
}
.kg-pulse {
    position: absolute;
    inset: -4px;
    border-radius: 50%;
    background: #00ff88;
    opacity: 0.3;
    animation: kg-ping 1s cubic-bezier(0, 0, 0.2, 1) infinite;
}
.kg-card {
    width: 20rem;
    padding: 1.5rem;
    border: 1px solid rgba(255, 255, 255, 0.1);
    border-radius: 1rem;
    background: rgba(0, 0, 0, 0.8);
    backdrop-filter: blur(24px);
    box-shadow: 0 25px 50px rgba(0, 0, 0, 0.5);
    animation: kg-slide-in 0.3s ease-out;
}
.kg-form-view {
    position: relative;
}
.kg-close {
    position: absolute;
    top: -0.5rem;
    right: -0.5rem;
    padding: 0.5rem;
    border: none;
    border-radius: 50%;
    background: transparent;
    color: #9ca3af;
    cursor: pointer;
}
.kg-close:hover {
    background: rgba(255, 255, 255, 0.1);
    color: #fff;
}
.kg-header {
    display: flex;
    align-items: flex-start;
    gap: 0.75rem;
    margin-bottom: 1.5rem;
}
.kg-header h3 {
    display: flex;
    align-items: center;
    margin: 0;
    font-size: 1rem;
    font-weight: 600;
}
.kg-avatar {
    display: flex;
    align-items: center;
    justify-content: center;
    width: 40px;
    height: 40px;
    border-radius: 50%;
    background: linear-gradient(to bottom right, #00cc66, #00ff88);
}
.kg-live-dot {
    width: 8px;
    height: 8px;
    margin-left: 0.5rem;
    border-radius: 50%;
    background: #22c55e;
    animation: kg-ping 1s cubic-bezier(0, 0, 0.2, 1) infinite;
}
.kg-badge {
    margin: 0;
    color: #4ade80;
    font-size: 0.75rem;
    font-weight: 500;
    letter-spacing: 0.05em;
}
.kg-pitch {
    margin-bottom: 1.5rem;
    color: #9ca3af;
    font-size: 0.875rem;
    line-height: 1.6;
}
.kg-field {
    margin-bottom: 1rem;
}
.kg-input {
    box-sizing: border-box;
    width: 100%;
    padding: 0.75rem 1rem;
    border: 1px solid rgba(255, 255, 255, 0.1);
    border-radius: 0.75rem;
    background: rgba(255, 255, 255, 0.05);
    color: #fff;
    outline: none;
}
.kg-input:focus {
    border-color: #00ff88;
    background: rgba(255, 255, 255, 0.1);
}
.kg-input-error,
.kg-input-error:focus {
    border-color: #ef4444;
}
.kg-error {
    margin-top: 0.5rem;
    padding: 0.5rem;
    border: 1px solid rgba(239, 68, 68, 0.2);
    border-radius: 0.5rem;
    background: rgba(239, 68, 68, 0.1);
    color: #f87171;
    font-size: 0.75rem;
}
.kg-submit {
    display: flex;
    align-items: center;
    justify-content: center;
    width: 100%;
    padding: 0.75rem 0;
    border: none;
    border-radius: 0.75rem;
    background: linear-gradient(to right, #00cc66, #00ff88);
    color: #fff;
    font-size: 0.875rem;
    font-weight: 700;
    cursor: pointer;
    transition: transform 0.3s ease, filter 0.3s ease;
}
.kg-submit:hover:not(:disabled) {
    transform: scale(1.05);
    filter: brightness(1.1);
}
.kg-submit:disabled {
    opacity: 0.7;
    cursor: default;
}
.kg-spinner {
    display: inline-block;
    width: 20px;
    height: 20px;
    border: 3px solid rgba(255, 255, 255, 0.3);
    border-radius: 50%;
    border-top-color: #fff;
    animation: kg-spin 1s linear infinite;
}
.kg-success {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 1.5rem 0;
    text-align: center;
}
.kg-success-icon {
    display: flex;
    align-items: center;
    justify-content: center;
    width: 64px;
    height: 64px;
    margin-bottom: 1rem;
    border-radius: 50%;
    background: rgba(34, 197, 94, 0.2);
    font-size: 2rem;
    animation: kg-pulse-fade 2s ease-in-out infinite;
}
.kg-success h3 {
    margin: 0 0 0.5rem;
    font-size: 1.25rem;
}
.kg-success p {
    margin: 0;
    color: #9ca3af;
    font-size: 0.875rem;
}
.kg-shake {
    animation: kg-shake 0.4s ease-in-out;
}
@keyframes kg-shake {
    0%, 100% { transform: translateX(0); }
    25% { transform: translateX(-4px); }
    75% { transform: translateX(4px); }
}
@keyframes kg-ping {
    75%, 100% { transform: scale(2); opacity: 0; }
}
@keyframes kg-spin {
    to { transform: rotate(360deg); }
}
@keyframes kg-pulse-fade {
    50% { opacity: 0.5; }
}
@keyframes kg-slide-in {
    from { transform: translateY(2.5rem); opacity: 0; }
    to { transform: translateY(0); opacity: 1; }
}
"#;
