pub mod body_metric;
pub mod exercise;
pub mod lenient;
pub mod session;
pub mod set_log;

pub use body_metric::{BodyMetric, BodyMetricUpsert};
pub use exercise::{
  Exercise, NewExercise, NewTemplate, NewTemplateExercise, TemplateExercise, TemplateWithExercises,
  WorkoutTemplate,
};
pub use session::{FinishSession, Session, SessionDetail};
pub use set_log::{SetLog, SetType, SetUpsert};
