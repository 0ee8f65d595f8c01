use serde::{Deserialize, Serialize};

/// Уникальный идентификатор размещённого объекта
pub type ObjectId = String;

/// Уникальный идентификатор плана
pub type PlanId = String;

/// Снимок плана: упорядоченный список объектов (порядок вставки)
pub type PlanSnapshot = Vec<PlacedObject>;

/// Размер сетки по умолчанию (50x50 клеток)
pub const DEFAULT_GRID_SIZE: u32 = 50;

/// Версия формата плана
pub const PLAN_FORMAT_VERSION: &str = "1.0.0";

// ============================================================================
// Поворот
// ============================================================================

/// Поворот объекта по часовой стрелке, кратный 90 градусам.
///
/// В JSON хранится числом градусов: `0`, `90`, `180`, `270`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Все допустимые повороты в порядке обхода
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Значение в градусах
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Следующий поворот: 0 → 90 → 180 → 270 → 0
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// true для 90 и 270: ширина и высота меняются местами
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Rotation::ALL
            .into_iter()
            .find(|r| r.degrees() == degrees)
            .ok_or_else(|| format!("rotation must be 0, 90, 180 or 270, got {degrees}"))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

// ============================================================================
// Каталог типов зданий
// ============================================================================

/// Категория здания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCategory {
    Headquarters,
    Defense,
    Production,
    Seasonal,
    Special,
}

impl BuildingCategory {
    /// Все категории в порядке отображения в палитре
    pub fn all() -> &'static [BuildingCategory] {
        &[
            BuildingCategory::Headquarters,
            BuildingCategory::Defense,
            BuildingCategory::Production,
            BuildingCategory::Seasonal,
            BuildingCategory::Special,
        ]
    }

    /// Название категории для отображения
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildingCategory::Headquarters => "Headquarters",
            BuildingCategory::Defense => "Defense",
            BuildingCategory::Production => "Production",
            BuildingCategory::Seasonal => "S5 Wild West",
            BuildingCategory::Special => "Special",
        }
    }
}

/// Тип здания (запись каталога). Размеры даны без поворота.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingType {
    pub id: String,
    pub name: String,
    pub category: BuildingCategory,
    /// Ширина в клетках (без поворота)
    pub width: u32,
    /// Высота в клетках (без поворота)
    pub height: u32,
    /// Цвет для отрисовки (#RRGGBB)
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    /// Максимальный уровень (минимальный всегда 1)
    pub max_level: u32,
    #[serde(default)]
    pub description: String,
}

// ============================================================================
// Размещённые объекты
// ============================================================================

fn default_level() -> u32 {
    1
}

/// Объект, размещённый на сетке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedObject {
    /// Уникальный идентификатор (не меняется после создания)
    pub id: ObjectId,
    /// Ссылка на тип в каталоге
    #[serde(alias = "buildingTypeId")]
    pub type_id: String,
    /// Левая верхняя клетка footprint'а без поворота
    pub grid_x: i32,
    pub grid_y: i32,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Подпись (имя игрока)
    #[serde(default, alias = "playerName", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlacedObject {
    /// Новый объект без поворота, уровень 1
    pub fn new(
        id: impl Into<ObjectId>,
        type_id: impl Into<String>,
        grid_x: i32,
        grid_y: i32,
    ) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            grid_x,
            grid_y,
            rotation: Rotation::Deg0,
            level: 1,
            label: None,
            notes: None,
        }
    }

    /// Применить частичные изменения к копии объекта
    pub fn with_changes(&self, changes: &ObjectChanges) -> Self {
        let mut updated = self.clone();
        if let Some(x) = changes.grid_x {
            updated.grid_x = x;
        }
        if let Some(y) = changes.grid_y {
            updated.grid_y = y;
        }
        if let Some(rotation) = changes.rotation {
            updated.rotation = rotation;
        }
        if let Some(level) = changes.level {
            updated.level = level;
        }
        if let Some(label) = &changes.label {
            updated.label = non_empty(label);
        }
        if let Some(notes) = &changes.notes {
            updated.notes = non_empty(notes);
        }
        updated
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Частичное изменение объекта. Пустая строка в `label`/`notes` очищает поле.
///
/// Ключи принимаются в camelCase и snake_case. Неизвестный ключ даёт ошибку
/// разбора вместо пустого изменения.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ObjectChanges {
    #[serde(default, alias = "grid_x", skip_serializing_if = "Option::is_none")]
    pub grid_x: Option<i32>,
    #[serde(default, alias = "grid_y", skip_serializing_if = "Option::is_none")]
    pub grid_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(
        default,
        alias = "playerName",
        alias = "player_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ObjectChanges {
    /// Изменение позиции
    pub fn position(grid_x: i32, grid_y: i32) -> Self {
        Self {
            grid_x: Some(grid_x),
            grid_y: Some(grid_y),
            ..Default::default()
        }
    }

    /// Изменение поворота
    pub fn rotation(rotation: Rotation) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    /// Изменение уровня
    pub fn level(level: u32) -> Self {
        Self {
            level: Some(level),
            ..Default::default()
        }
    }

    /// Затрагивает ли изменение геометрию (позицию или поворот)
    pub fn is_geometric(&self) -> bool {
        self.grid_x.is_some() || self.grid_y.is_some() || self.rotation.is_some()
    }

    /// Пустое изменение
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// План
// ============================================================================

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

fn default_format_version() -> String {
    PLAN_FORMAT_VERSION.to_string()
}

/// План улья: сетка и размещённые на ней объекты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HivePlan {
    pub id: PlanId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_grid_size")]
    pub grid_width: u32,
    #[serde(default = "default_grid_size")]
    pub grid_height: u32,
    /// Объекты плана (в старом формате `buildings`)
    #[serde(alias = "buildings")]
    pub objects: PlanSnapshot,
    /// Игровые координаты клетки (0, 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_y: Option<i32>,
    /// Миллисекунды с начала эпохи Unix
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
    #[serde(default = "default_format_version")]
    pub version: String,
}

impl HivePlan {
    /// Пустой план заданного размера
    pub fn empty(
        id: impl Into<PlanId>,
        name: impl Into<String>,
        grid_width: u32,
        grid_height: u32,
        now: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            grid_width,
            grid_height,
            objects: Vec::new(),
            origin_x: None,
            origin_y: None,
            created_at: now,
            updated_at: now,
            version: default_format_version(),
        }
    }

    /// Найти объект по ID
    pub fn get_object(&self, id: &str) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}
