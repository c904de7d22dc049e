use egui::{self, RichText};

use crate::ui::theme::{Colors, Icons};

const STEPS: [(&str, &str); 5] = [
    (
        "Заполните основную информацию",
        "Укажите кличку, породу и дату рождения собаки. Загрузите фото питомца.",
    ),
    (
        "Добавьте данные о родителях",
        "Внесите клички и даты рождения отца и матери.",
    ),
    (
        "Укажите бабушек и дедушек",
        "Заполните информацию о всех четырех бабушках и дедушках по отцовской и материнской линии.",
    ),
    (
        "Добавьте здоровье и награды",
        "Выберите количество сердечек (здоровье) и кубков (награды) от 0 до 3.",
    ),
    (
        "Сохраните и экспортируйте",
        "Сохраните родословную в галерею или перейдите в раздел \"Предпросмотр\" и экспортируйте \
         изображение размером 1050×1050px для печати на кружке.",
    ),
];

const TIP: &str = "Для лучшего результата используйте квадратное фото собаки с хорошим освещением. \
     Экспортированное изображение идеально подходит для печати на стандартных кружках!";

pub struct InstructionsView;

impl InstructionsView {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(format!("{} Как создать родословную", Icons::BOOK));
            ui.add_space(16.0);

            for (number, (title, text)) in STEPS.iter().enumerate() {
                ui.horizontal(|ui| {
                    step_badge(ui, number + 1);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(*title).strong());
                        ui.label(RichText::new(*text).color(Colors::TEXT_SECONDARY));
                    });
                });
                ui.add_space(12.0);
            }

            ui.add_space(16.0);

            egui::Frame::none()
                .fill(Colors::TIP_BG)
                .stroke(egui::Stroke::new(1.0, Colors::TIP_BORDER))
                .rounding(8.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        RichText::new(format!("{} Совет", Icons::LIGHTBULB))
                            .strong()
                            .color(Colors::PRIMARY_HOVER),
                    );
                    ui.add_space(4.0);
                    ui.label(RichText::new(TIP).color(egui::Color32::from_rgb(55, 65, 81)));
                });
        });
    }
}

impl Default for InstructionsView {
    fn default() -> Self {
        Self::new()
    }
}

fn step_badge(ui: &mut egui::Ui, number: usize) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 16.0, Colors::PRIMARY);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        number.to_string(),
        egui::FontId::proportional(16.0),
        egui::Color32::WHITE,
    );
}
