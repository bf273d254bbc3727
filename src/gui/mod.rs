use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::time::Instant;
use iced::{mouse, window, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Theme};

use crate::sim::{system::World, units::Float};

const BODY_COLOR: Color = Color::WHITE;
const BACKGROUND_COLOR: Color = Color::BLACK;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Message {
    Frame(Instant),
}

/// Windowed frame driver: advances the world by one tick per rendered frame.
pub(crate) struct Gui {
    world: World,
}

impl Gui {
    pub(crate) fn new(world: World) -> Self {
        Gui { world }
    }

    pub(crate) fn update(&mut self, message: Message) {
        match message {
            Message::Frame(_) => self.world.step(),
        }
    }

    pub(crate) fn view(&self) -> Element<'_, Message> {
        Canvas::new(BodyCanvas { world: &self.world })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub(crate) fn subscription(&self) -> Subscription<Message> {
        window::frames().map(Message::Frame)
    }
}

struct BodyCanvas<'a> {
    world: &'a World,
}

impl canvas::Program<Message> for BodyCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND_COLOR);

        let parameters = self.world.parameters();
        let scale = (bounds.width as Float / parameters.width)
            .min(bounds.height as Float / parameters.height);
        for body in self.world.bodies() {
            // The simulation's y axis points up.
            let center = Point::new(
                (body.position[0] * scale) as f32,
                bounds.height - (body.position[1] * scale) as f32,
            );
            let circle = Path::circle(center, (body.radius() * scale) as f32);
            frame.fill(&circle, BODY_COLOR);
        }
        vec![frame.into_geometry()]
    }
}
