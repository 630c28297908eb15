// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Upkeep Contributors

//! rumqttc-backed broker channel.

use crate::channel::{BrokerEvent, Channel};
use crate::credential::ClientCredential;
use crate::error::BrokerError;
use async_trait::async_trait;
use rumqttc::{
    AsyncClient, Event, EventLoop, LastWill, MqttOptions, Packet, QoS, TlsConfiguration, Transport,
};
use std::time::Duration;

/// Request capacity of the client's internal channel.
const CLIENT_QUEUE_CAPACITY: usize = 16;

/// Connection parameters for the broker, assembled from configuration.
#[derive(Debug, Clone)]
pub struct BrokerSettings {
    /// Device identity; doubles as the MQTT client id.
    pub device_id: String,
    pub host: String,
    pub port: u16,
    pub keep_alive: Duration,
    pub last_will: Option<LastWillConfig>,
}

/// Last-will message registered with the broker at connect time.
#[derive(Debug, Clone)]
pub struct LastWillConfig {
    pub topic: String,
    pub payload: String,
}

/// Channel handle backed by a shared `rumqttc::AsyncClient`.
///
/// Cloneable and safe for concurrent publishes; all clones feed the one
/// broker connection.
#[derive(Clone)]
pub struct MqttChannel {
    client: AsyncClient,
}

/// The inbound half of the connection: rumqttc's event loop, narrowed to
/// the events the session manager cares about.
pub struct MqttEventStream {
    eventloop: EventLoop,
}

impl MqttChannel {
    /// Build the client and its event stream. The network connection is
    /// established lazily, once the stream is first polled; the result
    /// arrives as a `BrokerEvent::Connected` or `Disconnected`.
    pub fn open(
        settings: BrokerSettings,
        credential: ClientCredential,
    ) -> (MqttChannel, MqttEventStream) {
        let mut options = MqttOptions::new(settings.device_id, settings.host, settings.port);
        options.set_keep_alive(settings.keep_alive);

        if let Some(will) = settings.last_will {
            options.set_last_will(LastWill::new(
                will.topic,
                will.payload.into_bytes(),
                QoS::AtMostOnce,
                false,
            ));
        }

        if let Some(tls) = credential.tls {
            options.set_transport(Transport::Tls(TlsConfiguration::Simple {
                ca: tls.ca_pem,
                alpn: None,
                client_auth: Some((tls.cert_pem, tls.key_pem)),
            }));
        }

        let (client, eventloop) = AsyncClient::new(options, CLIENT_QUEUE_CAPACITY);
        (MqttChannel { client }, MqttEventStream { eventloop })
    }
}

#[async_trait]
impl Channel for MqttChannel {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BrokerError> {
        self.client.publish(topic, QoS::AtMostOnce, false, payload).await?;
        Ok(())
    }

    async fn subscribe(&self, pattern: &str) -> Result<(), BrokerError> {
        self.client.subscribe(pattern, QoS::AtMostOnce).await?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.client.disconnect().await?;
        Ok(())
    }
}

impl MqttEventStream {
    /// Next broker event.
    ///
    /// Packets the agent has no use for (acks, pings) are skipped here. A
    /// poll error is mapped to `Disconnected` and the caller is expected to
    /// stop polling: re-polling would trigger the client's implicit
    /// reconnect, and this agent treats a lost connection as terminal.
    pub async fn next(&mut self) -> BrokerEvent {
        loop {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => return BrokerEvent::Connected,
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    return BrokerEvent::Message {
                        topic: publish.topic,
                        payload: publish.payload.to_vec(),
                    }
                }
                Ok(event) => {
                    tracing::trace!(?event, "ignoring broker event");
                }
                Err(err) => {
                    return BrokerEvent::Disconnected { reason: err.to_string() };
                }
            }
        }
    }
}
