use gloo_net::http::Request;
use whisper::{
    Api, Config, Delivery, DeliveryReply, DeliveryRequest, Error, Identity, Message, Result,
    SignupReply, SignupRequest,
};

/// the backend replies with a JSON body for failures too, so the status code
/// is never consulted
#[derive(Clone)]
pub struct HttpApi {
    config: Config,
}

impl HttpApi {
    pub fn new(config: Config) -> Self {
        HttpApi { config }
    }

    fn messages_url(&self, user_id: &str) -> String {
        let user_id: String = js_sys::encode_uri_component(user_id).into();
        self.config.api_url(&format!("messages/{user_id}"))
    }
}

fn network(e: gloo_net::Error) -> Error {
    Error::Network(e.to_string())
}

impl Api for HttpApi {
    async fn signup(&self, username: &str) -> Result<Identity> {
        let reply: SignupReply = Request::post(&self.config.api_url("signup"))
            .json(&SignupRequest { username })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?
            .json()
            .await
            .map_err(network)?;

        reply.into_identity()
    }

    async fn messages(&self, user_id: &str) -> Result<Vec<Message>> {
        let body = Request::get(&self.messages_url(user_id))
            .send()
            .await
            .map_err(network)?
            .text()
            .await
            .map_err(network)?;

        Message::parse_batch(&body)
    }

    async fn deliver(&self, recipient: &str, message: &str) -> Result<Delivery> {
        let reply: DeliveryReply = Request::post(&self.config.api_url("message"))
            .json(&DeliveryRequest {
                username: recipient,
                message,
            })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?
            .json()
            .await
            .map_err(network)?;

        Ok(reply.into())
    }
}
