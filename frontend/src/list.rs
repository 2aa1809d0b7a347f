use whisper::{Entry, RelativeAge};
use yew::{function_component, html, Html, Properties};

use crate::browser::locale_date;

#[derive(Properties, PartialEq)]
pub struct MessageListProps {
    pub entries: Vec<Entry>,
}

fn age_label(entry: &Entry) -> String {
    match entry.age {
        RelativeAge::Date(_) => locale_date(entry.created_at),
        age => age.to_string(),
    }
}

#[function_component(MessageList)]
pub fn list(props: &MessageListProps) -> Html {
    html! {
      <>
        <div class="inbox-head">
          <h2>{"Messages"}</h2>
          <span class="count">{props.entries.len()}</span>
        </div>
        if props.entries.is_empty() {
          <div class="empty">
            {"No messages yet. Share your link to get some 📭"}
          </div>
        } else {
          <div class="messages">
            {props.entries.iter().map(|entry| {
              html! {
                <div class="message-item">
                  <p>{&entry.text}</p>
                  <span title={entry.created_at.to_rfc2822()}>
                    {age_label(entry)}
                  </span>
                </div>
              }
            }).collect::<Html>()}
          </div>
        }
      </>
    }
}
