use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use whisper::{
    perform, Command, Config, Controller, InboxView, Outcome, Screen, SendView, SignupView,
    Status, Task, ViewMode, STORAGE_KEY, VERSION,
};
use yew::prelude::*;

use crate::{
    api::HttpApi,
    browser::{now, page_location, PageSession, WebBrowser},
    list::MessageList,
};

pub enum Msg {
    Command(Command),
    Outcome(Outcome),
}

pub struct App {
    controller: Controller<PageSession>,
    api: HttpApi,
}

impl App {
    /// run every task in the background and feed its outcome back
    fn spawn(&self, ctx: &Context<Self>, tasks: Vec<Task>) {
        for task in tasks {
            let link = ctx.link().clone();
            let api = self.api.clone();

            spawn_local(async move {
                let outcome = perform(task, &api, &WebBrowser).await;
                link.send_message(Msg::Outcome(outcome));
            });
        }
    }
}

fn on_username(e: InputEvent) -> Msg {
    Msg::Command(Command::EditUsername(
        e.target_unchecked_into::<HtmlInputElement>().value(),
    ))
}

fn on_message(e: InputEvent) -> Msg {
    Msg::Command(Command::EditMessage(
        e.target_unchecked_into::<HtmlTextAreaElement>().value(),
    ))
}

fn status_line(status: &Status) -> Html {
    html! {
      <p class={status.class()}>{&status.text}</p>
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = Config::default();
        let (controller, tasks) = Controller::init(
            config.clone(),
            page_location(),
            PageSession::open(STORAGE_KEY),
        );

        let app = Self {
            controller,
            api: HttpApi::new(config),
        };
        app.spawn(ctx, tasks);

        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let tasks = match msg {
            Msg::Command(command) => self.controller.dispatch(command),
            Msg::Outcome(outcome) => self.controller.complete(outcome),
        };
        self.spawn(ctx, tasks);

        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        let title = match self.controller.mode() {
            ViewMode::Inbox => format!("Whisper ({})", self.controller.messages().len()),
            _ => "Whisper".to_owned(),
        };
        gloo_utils::document().set_title(&title);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let screen = self.controller.screen(now());

        let region = match &screen {
            Screen::Signup(view) => signup(ctx, view),
            Screen::Inbox(view) => inbox(ctx, view),
            Screen::Send(view) => send(ctx, view),
        };

        html! {
          <>
            <header>
              <h1>{"Whis"}<span>{"per"}</span></h1>
              <p class="tagline">{screen.tagline()}</p>
            </header>
            <main>
              {region}
            </main>
            <footer>{"whisper "}{VERSION}</footer>
          </>
        }
    }
}

fn signup(ctx: &Context<App>, view: &SignupView) -> Html {
    let link = ctx.link();
    let username = view.username.clone();
    let onsubmit = link.callback(move |e: SubmitEvent| {
        e.prevent_default();
        Msg::Command(Command::Register(username.clone()))
    });

    html! {
      <section class="card">
        <form onsubmit={onsubmit}>
          <label for="signupUsername">{"Pick a username"}</label>
          <input
            id="signupUsername"
            type="text"
            autocomplete="off"
            value={view.username.clone()}
            oninput={link.callback(on_username)}
          />
          <button type="submit">{"Create my link"}</button>
        </form>
        {status_line(&view.status)}
      </section>
    }
}

fn inbox(ctx: &Context<App>, view: &InboxView) -> Html {
    let link = ctx.link();

    html! {
      <section class="card dashboard">
        <div class="badge">{&view.handle}</div>
        <div class="share">
          <input type="text" readonly=true value={view.share_link.clone()} />
          <button onclick={link.callback(|_| Msg::Command(Command::CopyShareLink))}>
            {"Copy"}
          </button>
        </div>
        {status_line(&view.copy_status)}
        <div class="actions">
          <button onclick={link.callback(|_| Msg::Command(Command::RefreshInbox))}>
            {"Refresh"}
          </button>
          <button class="logout" onclick={link.callback(|_| Msg::Command(Command::Logout))}>
            {"Log out"}
          </button>
        </div>
        <MessageList entries={view.list.entries.clone()} />
      </section>
    }
}

fn send(ctx: &Context<App>, view: &SendView) -> Html {
    let link = ctx.link();
    let draft = view.draft.clone();
    let onsubmit = link.callback(move |e: SubmitEvent| {
        e.prevent_default();
        Msg::Command(Command::SendMessage(draft.clone()))
    });

    html! {
      <section class="card">
        <h2>{&view.recipient_label}</h2>
        <form onsubmit={onsubmit}>
          <textarea
            id="sendMessageInput"
            rows="5"
            placeholder="Write something nice..."
            value={view.draft.clone()}
            oninput={link.callback(on_message)}
          />
          <button type="submit">{"Send anonymously"}</button>
        </form>
        {status_line(&view.status)}
      </section>
    }
}
