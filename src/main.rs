mod bridge;
mod config;
mod format;
mod gemini;
mod prompt;
mod selection;

use iced::{
    alignment, clipboard,
    event::{self, Event as IcedEvent},
    keyboard::{self, Key},
    time,
    widget::{
        button, center, column, container, markdown, mouse_area, opaque, radio, row, scrollable,
        stack, text, text_input,
    },
    window, Color, Element, Length, Subscription, Task, Theme,
};

use crate::bridge::Pending;
use crate::format::ResultDocument;
use crate::gemini::GeminiClient;
use crate::selection::{Difficulty, Field, FormState, Method};

fn main() -> iced::Result {
    // Best-effort .env load so API_KEY works like the config file
    let _ = dotenvy::dotenv();

    let config = config::Config::load();

    iced::application("주제 추천 프로그램", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: iced::Size::new(config.window.width as f32, config.window.height as f32),
            position: window::Position::Centered,
            resizable: false,
            ..Default::default()
        })
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    DifficultySelected(Difficulty),
    TopicChanged(String),
    DepartmentChanged(String),
    FieldSelected(Field),
    MethodSelected(Method),
    Submit,
    Poll,
    CopyResult,
    CloseModal,
    LinkClicked(markdown::Url),
}

struct App {
    config: config::Config,
    client: GeminiClient,
    form: FormState,
    pending: Option<Pending>,
    result: Option<ResultView>,
    notice: Option<String>,
}

/// One presented response; dropped entirely on dismissal.
struct ResultView {
    document: ResultDocument,
    items: Vec<markdown::Item>,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = config::Config::load();

        let api_key = config.api_key();
        let client = GeminiClient::with_config(config.gemini.model.clone(), api_key);
        if !client.has_credential() {
            eprintln!("Warning: no Gemini API key configured; requests will be rejected.");
        }

        let app = App {
            config,
            client,
            form: FormState::default(),
            pending: None,
            result: None,
            notice: None,
        };

        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DifficultySelected(difficulty) => {
                self.form.set_difficulty(difficulty);
                Task::none()
            }
            Message::TopicChanged(value) => {
                self.form.topic = value;
                Task::none()
            }
            Message::DepartmentChanged(value) => {
                self.form.department = value;
                Task::none()
            }
            Message::FieldSelected(field) => {
                self.form.select_field(field);
                Task::none()
            }
            Message::MethodSelected(method) => {
                self.form.select_method(method);
                Task::none()
            }
            Message::Submit => {
                // One outstanding request at a time; later submits
                // wait until the current one is delivered.
                if self.pending.is_some() {
                    return Task::none();
                }

                match self.form.validate() {
                    Ok(record) => {
                        let prompt = prompt::build(&record);
                        self.pending = Some(bridge::submit(self.client.clone(), prompt));
                    }
                    Err(err) => {
                        self.notice = Some(err.to_string());
                    }
                }
                Task::none()
            }
            Message::Poll => {
                if let Some(document) = self.pending.as_ref().and_then(Pending::poll) {
                    self.pending = None;
                    let items = markdown::parse(&document.markdown).collect();
                    self.result = Some(ResultView { document, items });
                }
                Task::none()
            }
            Message::CopyResult => {
                if let Some(result) = &self.result {
                    clipboard::write(result.document.html.clone())
                } else {
                    Task::none()
                }
            }
            Message::CloseModal => {
                self.result = None;
                self.notice = None;
                Task::none()
            }
            Message::LinkClicked(_) => Task::none(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let poll = if self.pending.is_some() {
            time::every(bridge::POLL_INTERVAL).map(|_| Message::Poll)
        } else {
            Subscription::none()
        };

        let keys = event::listen_with(|event, _status, _id| {
            if let IcedEvent::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(keyboard::key::Named::Escape),
                ..
            }) = event
            {
                Some(Message::CloseModal)
            } else {
                None
            }
        });

        Subscription::batch([poll, keys])
    }

    fn view(&self) -> Element<Message> {
        let form = self.form_view();

        if let Some(result) = &self.result {
            modal(form, self.result_view(result))
        } else if let Some(notice) = &self.notice {
            modal(form, notice_view(notice))
        } else {
            form
        }
    }

    fn form_view(&self) -> Element<Message> {
        let advanced = self.form.advanced_enabled();

        let difficulty = row(Difficulty::ALL.iter().map(|&choice| {
            radio(
                choice.label(),
                choice,
                Some(self.form.difficulty),
                Message::DifficultySelected,
            )
            .size(18)
            .into()
        }))
        .spacing(15);

        let topic_label = if advanced {
            text("자신이 생각하고 있는 주제를 입력하세요:")
        } else {
            text("자신이 생각하고 있는 주제를 입력하세요:").style(dimmed)
        };
        let mut topic_input = text_input("주제를 입력하세요", &self.form.topic).padding(8);
        if advanced {
            // A text input without on_input is inert; the entered
            // value stays visible either way.
            topic_input = topic_input.on_input(Message::TopicChanged);
        }

        let department_input = text_input("분야를 입력하세요", &self.form.department)
            .on_input(Message::DepartmentChanged)
            .padding(8);

        let fields = row(Field::ALL.iter().map(|&choice| {
            radio(
                choice.label(),
                choice,
                self.form.field,
                Message::FieldSelected,
            )
            .size(18)
            .into()
        }))
        .spacing(10);

        let method_label = if advanced {
            text("2. 탐구 방법 지정:")
        } else {
            text("2. 탐구 방법 지정:").style(dimmed)
        };
        let methods = row(Method::ALL.iter().map(|&choice| {
            radio(
                choice.label(),
                choice,
                self.form.method,
                Message::MethodSelected,
            )
            .size(18)
            .into()
        }))
        .spacing(15);

        let mut search_button = button(text("주제 찾기").size(15)).padding([8, 20]);
        if self.pending.is_none() {
            search_button = search_button.on_press(Message::Submit);
        }

        let mut controls = row![].spacing(10).align_y(alignment::Vertical::Center);
        if self.pending.is_some() {
            controls = controls.push(text("답변을 생성하는 중...").size(13).style(dimmed));
        }
        controls = controls.push(search_button);

        let content = column![
            text("탐구 난이도를 선택하세요:"),
            difficulty,
            topic_label,
            topic_input,
            text("자신의 분야를 입력하세요:"),
            department_input,
            text("1. 분야 지정:"),
            fields,
            method_label,
            methods,
            container(controls)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right),
        ]
        .spacing(15)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn result_view<'a>(&'a self, result: &'a ResultView) -> Element<'a, Message> {
        let body = scrollable(
            markdown::view(
                &result.items,
                markdown::Settings::default(),
                markdown::Style::from_palette(self.theme().palette()),
            )
            .map(Message::LinkClicked),
        )
        .height(Length::Fill);

        let controls = row![
            button(text("복사").size(13))
                .on_press(Message::CopyResult)
                .padding(6),
            button(text("닫기").size(13))
                .on_press(Message::CloseModal)
                .padding(6),
        ]
        .spacing(10);

        container(
            column![
                text("결과").size(18),
                body,
                container(controls)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Right),
            ]
            .spacing(10),
        )
        .width(Length::Fixed(self.config.window.result_width as f32))
        .height(Length::Fixed(self.config.window.result_height as f32))
        .padding(15)
        .style(container::rounded_box)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::TokyoNight
    }
}

fn notice_view(notice: &str) -> Element<'_, Message> {
    container(
        column![
            text("입력 오류").size(16),
            text(notice).size(14),
            container(
                button(text("확인").size(13))
                    .on_press(Message::CloseModal)
                    .padding(6)
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Right),
        ]
        .spacing(12),
    )
    .width(Length::Fixed(320.0))
    .padding(15)
    .style(container::rounded_box)
    .into()
}

/// Blocks the form behind a dimmed backdrop until dismissed.
fn modal<'a>(base: Element<'a, Message>, dialog: Element<'a, Message>) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(Message::CloseModal)
        )
    ]
    .into()
}

fn dimmed(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.extended_palette().background.strong.color),
    }
}
