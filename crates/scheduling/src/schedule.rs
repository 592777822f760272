use crate::error::ScheduleError;
use log::debug;
use models::{
    classroom::Classroom,
    lesson::{Lesson, WarningType},
    lesson_draft::LessonDraft,
    lesson_number::LessonNumber,
    study_group::{StudyGroup, Subgroup},
    subject::Subject,
    teacher::Teacher,
};
use uuid::Uuid;

/// Input for [`Schedule::add_lesson`].
///
/// Subject, study group and classroom are referenced by name and turned
/// into value objects during insertion; the teacher is passed resolved
/// because teachers are identity-carrying entities.
#[derive(Debug, Clone, Default)]
pub struct NewLesson {
    pub id: Uuid,
    pub subject_name: Option<String>,
    pub period: u32,
    pub teacher: Option<Teacher>,
    pub study_group_name: Option<String>,
    pub subgroup_name: Option<String>,
    pub classroom_name: Option<String>,
    pub classroom_description: Option<String>,
    pub comment: Option<String>,
}

/// The aggregate owning every lesson and draft of one timetable.
///
/// The schedule is the sole mutator of its lesson and draft sets and the
/// only writer of [`WarningType`]: every insertion runs the pairwise pass
/// over the committed set, and every removal or in-place edit triggers a
/// full re-scan so no stale warning outlives the peer that caused it.
#[derive(Debug, Clone)]
pub struct Schedule {
    id: Uuid,
    name: String,
    pub(crate) lessons: Vec<Lesson>,
    pub(crate) drafts: Vec<LessonDraft>,
    lesson_numbers: Vec<LessonNumber>,
}

impl Schedule {
    pub fn new(id: Uuid, name: impl Into<String>, mut lesson_numbers: Vec<LessonNumber>) -> Self {
        lesson_numbers.sort_by_key(|n| n.number);
        lesson_numbers.dedup_by_key(|n| n.number);

        Self {
            id,
            name: name.into(),
            lessons: Vec::new(),
            drafts: Vec::new(),
            lesson_numbers,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn drafts(&self) -> &[LessonDraft] {
        &self.drafts
    }

    pub fn lesson_numbers(&self) -> &[LessonNumber] {
        &self.lesson_numbers
    }

    pub fn lesson_number(&self, period: u32) -> Option<&LessonNumber> {
        self.lesson_numbers.iter().find(|n| n.number == period)
    }

    pub fn lesson(&self, id: Uuid) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn draft(&self, id: Uuid) -> Option<&LessonDraft> {
        self.drafts.iter().find(|d| d.id == id)
    }

    /// Whether any occurrence (lesson or draft) uses this id.
    pub fn contains(&self, id: Uuid) -> bool {
        self.lesson(id).is_some() || self.draft(id).is_some()
    }

    /// Builds the value objects from the given names, inserts the lesson
    /// into the committed set and runs the pairwise pass seeded by it.
    ///
    /// The study group name and a known period are required; subject,
    /// teacher and classroom may be absent — a missing teacher or classroom
    /// is not an error but classifies the lesson as `Conflict`.
    pub fn add_lesson(&mut self, new: NewLesson) -> Result<&Lesson, ScheduleError> {
        if self.contains(new.id) {
            return Err(ScheduleError::DuplicateOccurrence(new.id));
        }

        let number = self
            .lesson_number(new.period)
            .cloned()
            .ok_or(ScheduleError::UnknownLessonNumber(new.period))?;
        let group_name = new
            .study_group_name
            .ok_or(ScheduleError::MissingStudyGroupName)?;

        // The group carried on the lesson stays the bare named value, so two
        // lessons of "10-A" compare as the same group whether or not one of
        // them addresses a subgroup; the subgroup is a back-reference only.
        let group = StudyGroup::new(group_name.as_str());
        let subgroup = new.subgroup_name.map(|name| Subgroup::new(name, group_name));

        let mut lesson = Lesson::new(new.id);
        lesson.subject = new.subject_name.map(Subject::new);
        lesson.lesson_number = Some(number);
        lesson.teacher = new.teacher;
        lesson.study_group = Some(group);
        lesson.subgroup = subgroup;
        lesson.classroom = new
            .classroom_name
            .map(|name| Classroom::new(name, new.classroom_description));
        lesson.comment = new.comment;

        Ok(self.commit(lesson))
    }

    /// Inserts an already-built lesson and classifies it. Callers must have
    /// checked id uniqueness; used by insertion and draft promotion.
    pub(crate) fn commit(&mut self, mut lesson: Lesson) -> &Lesson {
        lesson.set_warning(initial_classification(&lesson));
        self.lessons.push(lesson);

        let idx = self.lessons.len() - 1;
        self.pairwise_pass(idx);
        &self.lessons[idx]
    }

    /// Registers a draft occurrence. Drafts are not conflict-checked; only
    /// committed lessons participate in the pairwise pass.
    pub fn add_draft(&mut self, draft: LessonDraft) -> Result<&LessonDraft, ScheduleError> {
        if self.contains(draft.id) {
            return Err(ScheduleError::DuplicateOccurrence(draft.id));
        }

        self.drafts.push(draft);
        Ok(&self.drafts[self.drafts.len() - 1])
    }

    /// Removes a committed lesson and re-scans the remainder, so peers that
    /// only collided with the removed lesson drop back to their base
    /// classification.
    pub fn remove_lesson(&mut self, id: Uuid) -> Option<Lesson> {
        let idx = self.lessons.iter().position(|l| l.id == id)?;
        let removed = self.lessons.remove(idx);
        self.refresh_warnings();
        Some(removed)
    }

    pub fn remove_draft(&mut self, id: Uuid) -> Option<LessonDraft> {
        let idx = self.drafts.iter().position(|d| d.id == id)?;
        Some(self.drafts.remove(idx))
    }

    /// The pairwise update pass, seeded by one lesson: every committed peer
    /// sharing the seed's study group or period is tested against the
    /// collision predicate (same teacher by id, same classroom by value),
    /// and both sides of a colliding pair become `Warning`. The seed's
    /// qualification check runs last, so a collision-free `Conflict` from
    /// the base classification survives but a collision overwrites it.
    pub(crate) fn pairwise_pass(&mut self, seed_idx: usize) {
        let seed = self.lessons[seed_idx].clone();

        let colliding: Vec<usize> = self
            .lessons
            .iter()
            .enumerate()
            .filter(|&(idx, other)| idx != seed_idx && collides(other, &seed))
            .map(|(idx, _)| idx)
            .collect();

        for idx in colliding {
            debug!(
                "lessons {} and {} collide, both flagged",
                self.lessons[idx].id, seed.id
            );
            self.lessons[idx].set_warning(WarningType::Warning);
            self.lessons[seed_idx].set_warning(WarningType::Warning);
        }

        if unqualified(&seed) {
            debug!("teacher on lesson {} is outside their subject list", seed.id);
            self.lessons[seed_idx].set_warning(WarningType::Warning);
        }
    }

    /// Full re-scan of the committed set: base classification for every
    /// lesson, then every colliding pair flagged, then the qualification
    /// check. Runs after any removal or in-place edit; the result is the
    /// same no matter how often it repeats over an unchanged set.
    pub fn refresh_warnings(&mut self) {
        for idx in 0..self.lessons.len() {
            let base = initial_classification(&self.lessons[idx]);
            self.lessons[idx].set_warning(base);
        }

        for a in 0..self.lessons.len() {
            let lesson = self.lessons[a].clone();
            for b in (a + 1)..self.lessons.len() {
                if collides(&self.lessons[b], &lesson) {
                    self.lessons[a].set_warning(WarningType::Warning);
                    self.lessons[b].set_warning(WarningType::Warning);
                }
            }
        }

        for idx in 0..self.lessons.len() {
            if unqualified(&self.lessons[idx]) {
                self.lessons[idx].set_warning(WarningType::Warning);
            }
        }
    }

    /// The committed lesson at one cell of the timetable grid, addressed by
    /// period and (group, optional subgroup). Read-only contract consumed
    /// by document export.
    pub fn lesson_at(
        &self,
        period: u32,
        group_name: &str,
        subgroup_name: Option<&str>,
    ) -> Option<&Lesson> {
        self.lessons.iter().find(|l| {
            l.lesson_number.as_ref().is_some_and(|n| n.number == period)
                && l.study_group.as_ref().is_some_and(|g| g.name == group_name)
                && match subgroup_name {
                    Some(name) => l.subgroup.as_ref().is_some_and(|s| s.name == name),
                    None => l.subgroup.is_none(),
                }
        })
    }

    /// Distinct (group, subgroup) columns of the grid, sorted by name.
    pub fn columns(&self) -> Vec<(String, Option<String>)> {
        let mut columns: Vec<(String, Option<String>)> = self
            .lessons
            .iter()
            .filter_map(|l| {
                l.study_group
                    .as_ref()
                    .map(|g| (g.name.clone(), l.subgroup.as_ref().map(|s| s.name.clone())))
            })
            .collect();

        columns.sort();
        columns.dedup();
        columns
    }
}

/// `Conflict` when the teacher or classroom binding is missing entirely,
/// `Normal` otherwise. Assigned before the peer scan, which may overwrite
/// it with `Warning` (severity is deliberately not monotonic).
fn initial_classification(lesson: &Lesson) -> WarningType {
    if lesson.teacher.is_none() || lesson.classroom.is_none() {
        WarningType::Conflict
    } else {
        WarningType::Normal
    }
}

/// Whether two lessons occupy the same slot: same study group or same
/// period, compared by whole-value equality. Lessons without the relevant
/// binding never match on it.
fn shares_slot(a: &Lesson, b: &Lesson) -> bool {
    let same_group = a.study_group.is_some() && a.study_group == b.study_group;
    let same_period = a.lesson_number.is_some() && a.lesson_number == b.lesson_number;
    same_group || same_period
}

/// The collision predicate: same teacher (by id) in the same classroom (by
/// value) for two lessons sharing a slot. Room clashes across different
/// teachers are intentionally out of scope; the engine models teacher
/// double-booking only.
fn collides(a: &Lesson, b: &Lesson) -> bool {
    let same_teacher = matches!(
        (&a.teacher, &b.teacher),
        (Some(x), Some(y)) if x.id == y.id
    );
    let same_room = matches!(
        (&a.classroom, &b.classroom),
        (Some(x), Some(y)) if x == y
    );

    same_teacher && same_room && shares_slot(a, b)
}

/// A lesson whose teacher's subject list does not contain the lesson's
/// subject. A teacher with no subject on the lesson counts as unqualified,
/// since the qualification cannot be verified; without a teacher the check
/// does not apply (that case is already `Conflict`).
fn unqualified(lesson: &Lesson) -> bool {
    match (&lesson.teacher, &lesson.subject) {
        (Some(teacher), Some(subject)) => !teacher.teaches(subject),
        (Some(_), None) => true,
        (None, _) => false,
    }
}
